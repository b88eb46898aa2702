//! XML exchange format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <players>
//!   <player>
//!     <full_name>Lionel Messi</full_name>
//!     <birth_date>1987-06-24</birth_date>
//!     <team>Inter Miami</team>
//!     <home_city>Miami</home_city>
//!     <squad>Main</squad>
//!     <position>Forward</position>
//!   </player>
//! </players>
//! ```
//!
//! Decoding is all-or-nothing: the first malformed or invalid record aborts
//! the whole document.

use super::error::XmlError;
use crate::models::{Player, PlayerField, RawPlayer};
use crate::player::{PlayerValidator, ValidationRules};

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

pub const ROOT_TAG: &str = "players";
pub const PLAYER_TAG: &str = "player";

/// Serialize players in order, children in canonical field order.
pub fn encode_players(players: &[Player]) -> Result<String, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_event(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;

    for player in players {
        write_event(&mut writer, Event::Start(BytesStart::new(PLAYER_TAG)))?;
        for (field, value) in player.field_values() {
            write_event(&mut writer, Event::Start(BytesStart::new(field.key())))?;
            write_event(&mut writer, Event::Text(BytesText::new(&value)))?;
            write_event(&mut writer, Event::End(BytesEnd::new(field.key())))?;
        }
        write_event(&mut writer, Event::End(BytesEnd::new(PLAYER_TAG)))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|err| XmlError::Write(err.to_string()))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlError> {
    writer.write_event(event).map_err(|err| XmlError::Write(err.to_string()))
}

/// A `<player>` element being read.
struct PendingPlayer {
    index: usize,
    raw: RawPlayer,
    seen: Vec<PlayerField>,
}

impl PendingPlayer {
    fn new(index: usize) -> Self {
        Self { index, raw: RawPlayer::default(), seen: Vec::with_capacity(6) }
    }

    fn finish(self, rules: &ValidationRules, today: NaiveDate) -> Result<Player, XmlError> {
        if let Some(field) = PlayerField::all().iter().find(|field| !self.seen.contains(field)) {
            return Err(XmlError::MissingField { index: self.index, field: *field });
        }

        PlayerValidator::validate(&self.raw, rules, today)
            .map_err(|source| XmlError::InvalidPlayer { index: self.index, source })
    }
}

enum State {
    Document,
    Root,
    Player(PendingPlayer),
    Field(PendingPlayer, PlayerField, String),
    Done,
}

/// Parse and validate every `<player>` in the document.
pub fn decode_players(
    xml: &str,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Result<Vec<Player>, XmlError> {
    // No text trimming here; the validator trims each assembled field once
    let mut reader = Reader::from_str(xml);

    let mut state = State::Document;
    let mut players = Vec::new();

    loop {
        let event = reader.read_event().map_err(|err| XmlError::Syntax {
            position: byte_position(&reader),
            message: err.to_string(),
        })?;

        state = match event {
            Event::Start(element) => open_element(state, &tag_name(&element), players.len())?,
            Event::Empty(element) => {
                let opened = open_element(state, &tag_name(&element), players.len())?;
                close_element(opened, rules, today, &mut players, byte_position(&reader))?
            }
            Event::End(_) => close_element(state, rules, today, &mut players, byte_position(&reader))?,
            Event::Text(text) => {
                let value = text.unescape().map_err(|err| XmlError::Syntax {
                    position: byte_position(&reader),
                    message: err.to_string(),
                })?;
                append_text(state, &value)?
            }
            Event::CData(data) => {
                let value = std::str::from_utf8(&data).map_err(|err| XmlError::Syntax {
                    position: byte_position(&reader),
                    message: err.to_string(),
                })?;
                append_text(state, value)?
            }
            Event::Eof => break,
            // declaration, comments, processing instructions, doctype
            _ => state,
        };
    }

    match state {
        State::Done => Ok(players),
        State::Document => Err(XmlError::MissingRoot),
        _ => Err(XmlError::Syntax {
            position: byte_position(&reader),
            message: "document ended before </players>".to_string(),
        }),
    }
}

fn open_element(state: State, name: &str, decoded: usize) -> Result<State, XmlError> {
    match state {
        State::Document if name == ROOT_TAG => Ok(State::Root),
        State::Document => Err(XmlError::UnexpectedRoot { name: name.to_string() }),
        State::Root if name == PLAYER_TAG => Ok(State::Player(PendingPlayer::new(decoded + 1))),
        State::Root => {
            Err(XmlError::UnexpectedElement { name: name.to_string(), after: decoded })
        }
        State::Player(pending) => {
            let Some(field) = PlayerField::from_key(name) else {
                return Err(XmlError::UnknownField { index: pending.index, name: name.to_string() });
            };
            if pending.seen.contains(&field) {
                return Err(XmlError::DuplicateField { index: pending.index, field });
            }
            Ok(State::Field(pending, field, String::new()))
        }
        State::Field(pending, field, _) => {
            Err(XmlError::NestedElement { index: pending.index, field })
        }
        State::Done => Err(XmlError::TrailingElement { name: name.to_string() }),
    }
}

fn close_element(
    state: State,
    rules: &ValidationRules,
    today: NaiveDate,
    players: &mut Vec<Player>,
    position: u64,
) -> Result<State, XmlError> {
    match state {
        State::Field(mut pending, field, text) => {
            pending.raw.set(field, text);
            pending.seen.push(field);
            Ok(State::Player(pending))
        }
        State::Player(pending) => {
            players.push(pending.finish(rules, today)?);
            Ok(State::Root)
        }
        State::Root => Ok(State::Done),
        State::Document | State::Done => Err(XmlError::Syntax {
            position,
            message: "closing tag without a matching opening tag".to_string(),
        }),
    }
}

fn append_text(state: State, text: &str) -> Result<State, XmlError> {
    match state {
        State::Field(pending, field, mut value) => {
            value.push_str(text);
            Ok(State::Field(pending, field, value))
        }
        other if text.trim().is_empty() => Ok(other),
        _ => Err(XmlError::StrayText { text: text.trim().to_string() }),
    }
}

fn tag_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn byte_position(reader: &Reader<&[u8]>) -> u64 {
    u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX)
}
