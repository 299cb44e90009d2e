//! Exact-match lookup over a loaded world.
//!
//! Name and index searches scan every entity in file order; skill searches
//! walk each port's people.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::world::World;

/// Which attribute a query is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBy {
    Name,
    Index,
    Skill,
}

impl FromStr for SearchBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SearchBy::Name),
            "index" | "id" => Ok(SearchBy::Index),
            "skill" => Ok(SearchBy::Skill),
            other => Err(SearchError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The query was blank.
    EmptyQuery,
    UnknownField(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::EmptyQuery => write!(f, "no search terms given"),
            SearchError::UnknownField(field) => {
                write!(f, "cannot search by `{}` (expected name, index or skill)", field)
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Return every entity whose `by` attribute equals `query` (trimmed).
pub fn search<'w>(
    world: &'w World,
    by: SearchBy,
    query: &str,
) -> Result<Vec<&'w Entity>, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let hits: Vec<&Entity> = match by {
        SearchBy::Name => world
            .all_entities()
            .iter()
            .filter(|e| e.name == query)
            .collect(),
        SearchBy::Index => world
            .all_entities()
            .iter()
            .filter(|e| e.id.to_string() == query)
            .collect(),
        SearchBy::Skill => world
            .ports()
            .flat_map(|port| world.people(port.id))
            .filter(|person| person.as_person().is_some_and(|p| p.skill == query))
            .collect(),
    };
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::load_world;

    fn world() -> World {
        load_world(
            "port Boston 1 0\n\
             port Lanshan 2 0\n\
             person Sara 40 1 crane\n\
             person Ravi 41 2 crane\n\
             person Sara 42 2 cook\n\
             pship Sara 20 2\n",
        )
        .unwrap()
    }

    fn ids(hits: Vec<&Entity>) -> Vec<u32> {
        hits.into_iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_search_by_name_spans_kinds() {
        let world = world();
        assert_eq!(ids(search(&world, SearchBy::Name, "Sara").unwrap()), vec![40, 42, 20]);
        assert!(search(&world, SearchBy::Name, "sara").unwrap().is_empty());
    }

    #[test]
    fn test_search_by_index() {
        let world = world();
        assert_eq!(ids(search(&world, SearchBy::Index, " 41 ").unwrap()), vec![41]);
        assert!(search(&world, SearchBy::Index, "041").unwrap().is_empty());
    }

    #[test]
    fn test_search_by_skill_walks_ports() {
        let world = world();
        assert_eq!(ids(search(&world, SearchBy::Skill, "crane").unwrap()), vec![40, 41]);
        assert!(search(&world, SearchBy::Skill, "pilot").unwrap().is_empty());
    }

    #[test]
    fn test_blank_query_is_an_error() {
        let world = world();
        assert_eq!(
            search(&world, SearchBy::Name, "   "),
            Err(SearchError::EmptyQuery)
        );
    }

    #[test]
    fn test_parse_search_field() {
        assert_eq!("Name".parse::<SearchBy>(), Ok(SearchBy::Name));
        assert_eq!("id".parse::<SearchBy>(), Ok(SearchBy::Index));
        assert!("colour".parse::<SearchBy>().is_err());
    }
}
