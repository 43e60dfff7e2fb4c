use std::fmt;

use crate::random::{pick_many, pick_one, RandomSource, Result};

mod pools;
use pools::{ARMS, CORES, DIAGNOSTICS, HEADS, PROTOCOLS, RECOMMENDATIONS, THREATS};

pub fn threat(rng: &mut dyn RandomSource) -> Result<String> {
    pick_one(rng, THREATS).map(|text| (*text).to_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loadout {
    pub head: &'static str,
    pub left_arm: &'static str,
    pub right_arm: &'static str,
    pub core: &'static str,
}

impl fmt::Display for Loadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**[DEATHBOT LOADOUT]**")?;
        writeln!(f, "HEAD: **{}**", self.head)?;
        writeln!(f, "LEFT ARM: **{}**", self.left_arm)?;
        writeln!(f, "RIGHT ARM: **{}**", self.right_arm)?;
        write!(f, "CORE: **{}**", self.core)
    }
}

/// Each slot is drawn on its own, so both arms can end up the same.
pub fn loadout(rng: &mut dyn RandomSource) -> Result<Loadout> {
    Ok(Loadout {
        head: *pick_one(rng, HEADS)?,
        left_arm: *pick_one(rng, ARMS)?,
        right_arm: *pick_one(rng, ARMS)?,
        core: *pick_one(rng, CORES)?,
    })
}

const MIN_DIAGNOSTICS: usize = 2;
const MAX_DIAGNOSTICS: usize = 4;

pub fn diagnostic_report(rng: &mut dyn RandomSource) -> Result<String> {
    let count = MIN_DIAGNOSTICS + rng.below(MAX_DIAGNOSTICS - MIN_DIAGNOSTICS + 1);
    let lines = pick_many(rng, DIAGNOSTICS, count)?;
    let recommendation = pick_one(rng, RECOMMENDATIONS)?;

    let mut report = String::from("**[DIAGNOSTIC REPORT]**\n");
    for line in lines {
        report.push_str("> ");
        report.push_str(line);
        report.push('\n');
    }
    report.push_str("**RECOMMENDATION:** ");
    report.push_str(recommendation);

    Ok(report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Text(&'static str),
    SelfDestruct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protocol {
    pub id: &'static str,
    pub name: &'static str,
    pub directive: Directive,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**[PROTOCOL {}: {}]**", self.id, self.name)?;

        if let Directive::Text(text) = self.directive {
            write!(f, "\n{text}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolEntry {
    Directive(&'static Protocol),
    /// Hands control over to the self-destruct sequence.
    SelfDestruct(&'static Protocol),
    Unauthorized { requested: String },
}

impl ProtocolEntry {
    fn from_protocol(protocol: &'static Protocol) -> Self {
        match protocol.directive {
            Directive::Text(_) => Self::Directive(protocol),
            Directive::SelfDestruct => Self::SelfDestruct(protocol),
        }
    }
}

/// Looks up a protocol by id, or picks one at random if no id is given.
///
/// Unknown ids never fail, they come back as [`ProtocolEntry::Unauthorized`].
pub fn protocol(rng: &mut dyn RandomSource, id: Option<&str>) -> Result<ProtocolEntry> {
    let Some(requested) = id else {
        return pick_one(rng, PROTOCOLS).map(ProtocolEntry::from_protocol);
    };

    let wanted = requested.trim();
    let wanted = wanted
        .get(..9)
        .filter(|prefix| prefix.eq_ignore_ascii_case("protocol "))
        .map_or(wanted, |_| wanted[9..].trim_start());

    let entry = PROTOCOLS
        .iter()
        .find(|protocol| protocol.id.eq_ignore_ascii_case(wanted))
        .map_or_else(
            || ProtocolEntry::Unauthorized {
                requested: requested.to_owned(),
            },
            ProtocolEntry::from_protocol,
        );

    Ok(entry)
}
