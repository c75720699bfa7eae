use std::collections::HashMap;

use serde::Serialize;

use crate::{error::StatsError, types::Track, utils};

/// How a resolved group presents its raw values. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transform {
    /// Round to the nearest integer.
    #[default]
    Round,
    /// Multiply, then round. `Scale(100.0)` turns 0-1 fractions into percentages.
    Scale(f64),
    /// Raw values are Unix timestamps, shown as `dd/mm/yyyy`.
    Date,
    /// Raw values are milliseconds, shown as `"3m 25s"`.
    Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailValue {
    Number(f64),
    Text(String),
}

/// One side of a resolved group: the value plus the track it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct Detail {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    pub value: DetailValue,
    #[serde(skip)]
    raw: f64,
}

impl Detail {
    fn for_track(id: &str, raw: f64, lookup: &HashMap<String, Track>) -> Self {
        let track = lookup.get(id);
        Self {
            id: Some(id.to_string()),
            name: track.map(|t| t.display_name().to_string()),
            cover_image: track.and_then(Track::cover_image),
            spotify_url: track.and_then(Track::spotify_url),
            value: DetailValue::Number(raw),
            raw,
        }
    }

    fn anonymous(raw: f64) -> Self {
        Self {
            id: None,
            name: None,
            cover_image: None,
            spotify_url: None,
            value: DetailValue::Number(raw),
            raw,
        }
    }

    /// Value before presentation, after any scaling.
    pub fn raw(&self) -> f64 {
        self.raw
    }

    fn finish(&mut self, transform: Transform) {
        self.value = match transform {
            Transform::Round => DetailValue::Number(self.raw.round()),
            Transform::Scale(factor) => {
                self.raw *= factor;
                DetailValue::Number(self.raw.round())
            }
            Transform::Date => match utils::format_unix_date(self.raw) {
                Some(date) => DetailValue::Text(date),
                None => DetailValue::Number(self.raw.round()),
            },
            Transform::Duration => DetailValue::Text(utils::format_duration_ms(self.raw)),
        };
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub min: Detail,
    pub max: Detail,
    pub avg: Detail,
    #[serde(skip)]
    pub count: u64,
}

impl GroupSummary {
    pub fn mean(&self) -> f64 {
        self.avg.raw
    }
}

#[derive(Debug, Clone)]
struct Extreme {
    id: String,
    value: f64,
}

/// Running min/max/mean over one numeric dimension.
///
/// The first record to reach an extreme keeps it; later records with an
/// equal value do not replace it. [`Group::resolve`] consumes the group, so
/// nothing can be pushed after it has been resolved.
#[derive(Debug, Clone, Default)]
pub struct Group {
    sum: f64,
    count: u64,
    min: Option<Extreme>,
    max: Option<Extreme>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: &str, value: f64) {
        // NaN would poison both the sum and every comparison after it
        if !value.is_finite() {
            return;
        }

        self.sum += value;
        self.count += 1;

        match (&self.min, &self.max) {
            (Some(min), Some(max)) => {
                if value > max.value {
                    self.max = Some(Extreme { id: id.to_string(), value });
                } else if value < min.value {
                    self.min = Some(Extreme { id: id.to_string(), value });
                }
            }
            _ => {
                let first = Extreme { id: id.to_string(), value };
                self.min = Some(first.clone());
                self.max = Some(first);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Computes the mean, attaches track metadata to min and max and applies
    /// `transform` to all three values.
    ///
    /// An empty group yields [`StatsError::NoData`]; callers leave it out of
    /// the output.
    pub fn resolve(
        self,
        lookup: &HashMap<String, Track>,
        transform: Transform,
    ) -> Result<GroupSummary, StatsError> {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return Err(StatsError::NoData);
        };
        if self.count == 0 {
            return Err(StatsError::NoData);
        }

        let mut summary = GroupSummary {
            min: Detail::for_track(&min.id, min.value, lookup),
            max: Detail::for_track(&max.id, max.value, lookup),
            avg: Detail::anonymous(self.sum / self.count as f64),
            count: self.count,
        };

        summary.min.finish(transform);
        summary.max.finish(transform);
        summary.avg.finish(transform);

        Ok(summary)
    }
}
