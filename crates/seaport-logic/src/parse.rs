//! Line-record parser for world files.
//!
//! Each non-blank line is one record: a discriminator token followed by the
//! common header `name index parent` and kind-specific payload fields.
//!
//! ```text
//! // port   name index parent
//! port Lanshan 10000 0
//! // dock   name index parent(port)
//! dock Pier_5 20005 10000
//! // cship  name index parent(dock|port) weight length width draft cargoWeight cargoVolume cargoValue
//! cship Hauler 40003 20005 200.5 300.1 40.7 20.0 150.0 175.0 800.0
//! // person name index parent(port) skill
//! person Sara 50000 10000 electrician
//! // job    name index parent(ship|dock) duration requirements...
//! job Load 60001 40003 12.5 crane stevedore
//! ```
//!
//! Lines with an unknown discriminator (including `//` comments) are skipped
//! without error. Missing payload numbers default to zero.

use std::str::SplitWhitespace;

use crate::entity::{Entity, EntityId, EntityKind, JobData, ShipClass, ShipSpecs};
use crate::error::{ParseError, ParseErrorKind};

/// A parsed record together with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number.
    pub line: usize,
    pub entity: Entity,
}

/// Parse one trimmed or untrimmed line.
///
/// Returns `Ok(None)` for blank lines and unknown discriminators.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Entity>, ParseError> {
    let mut fields = Fields {
        tokens: text.split_whitespace(),
        line,
    };
    let Some(kind) = fields.tokens.next().and_then(EntityKind::from_tag) else {
        return Ok(None);
    };

    let name = fields.required("name")?.to_string();
    let id = fields.id("index")?;

    let entity = match kind {
        EntityKind::Port => {
            // Ports carry a placeholder parent (usually 0); it is never resolved.
            fields.optional_id("parent")?;
            Entity::port(name, id)
        }
        EntityKind::Dock => {
            let parent = fields.id("parent")?;
            Entity::dock(name, id, parent)
        }
        EntityKind::PassengerShip | EntityKind::CargoShip => {
            let parent = fields.id("parent")?;
            let specs = ShipSpecs {
                weight: fields.number("weight")?,
                length: fields.number("length")?,
                width: fields.number("width")?,
                draft: fields.number("draft")?,
            };
            let class = if kind == EntityKind::PassengerShip {
                ShipClass::Passenger {
                    passengers: fields.count("passengers")?,
                    rooms: fields.count("rooms")?,
                    occupied_rooms: fields.count("occupied_rooms")?,
                }
            } else {
                ShipClass::Cargo {
                    cargo_weight: fields.number("cargo_weight")?,
                    cargo_volume: fields.number("cargo_volume")?,
                    cargo_value: fields.number("cargo_value")?,
                }
            };
            Entity::ship(name, id, parent, specs, class)
        }
        EntityKind::Person => {
            let parent = fields.id("parent")?;
            let skill = fields.tokens.next().unwrap_or_default();
            Entity::person(name, id, parent, skill)
        }
        EntityKind::Job => {
            let parent = fields.id("parent")?;
            let duration = fields.number("duration")?;
            let requirements = fields.tokens.map(str::to_string).collect();
            Entity::job(
                name,
                id,
                parent,
                JobData {
                    duration,
                    requirements,
                },
            )
        }
    };

    Ok(Some(entity))
}

/// Iterator over the records of a world file, in file order.
///
/// Yields one item per recognised record; blank and unknown lines are
/// consumed silently.
pub struct Records<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Records<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, text) in self.lines.by_ref() {
            let line = idx + 1;
            match parse_line(text.trim(), line) {
                Ok(Some(entity)) => return Some(Ok(Record { line, entity })),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

/// Convenience wrapper for [`Records::new`].
pub fn records(text: &str) -> Records<'_> {
    Records::new(text)
}

struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Fields<'a> {
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line: self.line,
            kind,
        }
    }

    fn required(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        self.tokens
            .next()
            .ok_or_else(|| self.error(ParseErrorKind::MissingField(field)))
    }

    fn id(&mut self, field: &'static str) -> Result<EntityId, ParseError> {
        let token = self.required(field)?;
        self.parse(field, token)
    }

    fn optional_id(&mut self, field: &'static str) -> Result<Option<EntityId>, ParseError> {
        match self.tokens.next() {
            Some(token) => self.parse(field, token).map(Some),
            None => Ok(None),
        }
    }

    fn number(&mut self, field: &'static str) -> Result<f64, ParseError> {
        match self.tokens.next() {
            Some(token) => self.parse(field, token),
            None => Ok(0.0),
        }
    }

    fn count(&mut self, field: &'static str) -> Result<u32, ParseError> {
        match self.tokens.next() {
            Some(token) => self.parse(field, token),
            None => Ok(0),
        }
    }

    fn parse<T: std::str::FromStr>(
        &self,
        field: &'static str,
        token: &str,
    ) -> Result<T, ParseError> {
        token.parse().map_err(|_| {
            self.error(ParseErrorKind::InvalidNumber {
                field,
                token: token.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Payload;

    #[test]
    fn test_blank_and_unknown_lines_are_skipped() {
        assert_eq!(parse_line("", 1), Ok(None));
        assert_eq!(parse_line("   ", 1), Ok(None));
        assert_eq!(parse_line("// port name index parent", 1), Ok(None));
        assert_eq!(parse_line("lighthouse Beacon 5 1", 1), Ok(None));
    }

    #[test]
    fn test_port_parent_is_dropped() {
        let port = parse_line("port Lanshan 10000 0", 1).unwrap().unwrap();
        assert_eq!(port.id, 10000);
        assert_eq!(port.name, "Lanshan");
        assert_eq!(port.parent, None);
        assert_eq!(port.kind(), EntityKind::Port);

        let bare = parse_line("port Lanshan 10000", 1).unwrap().unwrap();
        assert_eq!(bare.parent, None);
    }

    #[test]
    fn test_cargo_ship_fields() {
        let line = "cship Hauler 40003 20005 200.5 300.1 40.7 20.0 150 175 800.25";
        let ship = parse_line(line, 3).unwrap().unwrap();
        assert_eq!(ship.parent, Some(20005));
        let data = ship.as_ship().unwrap();
        assert_eq!(data.specs.weight, 200.5);
        assert_eq!(data.specs.draft, 20.0);
        assert_eq!(
            data.class,
            ShipClass::Cargo {
                cargo_weight: 150.0,
                cargo_volume: 175.0,
                cargo_value: 800.25,
            }
        );
        assert!(data.jobs.is_empty());
    }

    #[test]
    fn test_passenger_ship_missing_payload_defaults_to_zero() {
        let ship = parse_line("pship Ferry 30001 10000 100 50", 1)
            .unwrap()
            .unwrap();
        let data = ship.as_ship().unwrap();
        assert_eq!(data.specs.length, 50.0);
        assert_eq!(data.specs.width, 0.0);
        assert_eq!(
            data.class,
            ShipClass::Passenger {
                passengers: 0,
                rooms: 0,
                occupied_rooms: 0,
            }
        );
        assert_eq!(ship.kind(), EntityKind::PassengerShip);
    }

    #[test]
    fn test_person_and_job_payloads() {
        let person = parse_line("person Sara 50000 10000 electrician", 1)
            .unwrap()
            .unwrap();
        assert_eq!(person.as_person().unwrap().skill, "electrician");

        let job = parse_line("job Load 60001 40003 12.5 crane crane stevedore", 1)
            .unwrap()
            .unwrap();
        match job.payload {
            Payload::Job(data) => {
                assert_eq!(data.duration, 12.5);
                assert_eq!(data.requirements, vec!["crane", "crane", "stevedore"]);
            }
            other => panic!("expected job payload, got {other:?}"),
        }
    }

    #[test]
    fn test_header_errors_carry_line_numbers() {
        let err = parse_line("dock Pier_5", 4).unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.kind, ParseErrorKind::MissingField("index"));

        let err = parse_line("dock Pier_5 20005", 5).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingField("parent"));

        let err = parse_line("cship Hauler 40003 20005 heavy", 6).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::InvalidNumber {
                field: "weight",
                token: "heavy".into(),
            }
        );
    }

    #[test]
    fn test_records_iterator_tracks_source_lines() {
        let text = "\n  port Lanshan 10000 0  \n// comment\n\ndock Pier_5 20005 10000\n";
        let records: Vec<Record> = records(text).collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 5);
        assert_eq!(records[1].entity.kind(), EntityKind::Dock);
    }
}
