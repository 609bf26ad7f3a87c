//! Exchange document types
//!
//! Field names and casing follow the DaslSimulate wire schema exactly, so the
//! Rust names are mapped with `serde(rename)` where they differ.

use super::{timespan, timestamp, ExchangeError};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Simulation request: rule script plus the history to run it over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaslData {
    /// DARL rule script, passed through untouched
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    /// Time series the rules are simulated against
    pub history: DaslSet,
}

impl DaslData {
    pub fn new(code: impl Into<String>, history: DaslSet) -> Self {
        Self {
            code: code.into(),
            history,
        }
    }

    /// Check the request before it goes on the wire
    ///
    /// The history must hold at least one state and every value must
    /// satisfy [`DarlVar::validate`].
    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.history.events.is_empty() {
            return Err(ExchangeError::EmptyHistory);
        }
        for state in &self.history.events {
            state.value_map()?;
            for var in &state.values {
                var.validate()?;
            }
        }
        Ok(())
    }
}

/// An ordered sequence of time-stamped states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaslSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<DaslState>,
    /// Interval between consecutive samples
    #[serde(rename = "sampleTime", with = "timespan", default = "Duration::zero")]
    pub sample_time: Duration,
    #[serde(default)]
    pub description: Option<String>,
}

impl DaslSet {
    pub fn new(events: Vec<DaslState>, sample_time: Duration) -> Self {
        Self {
            events,
            sample_time,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Values that changed or became valid at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaslState {
    #[serde(rename = "timeStamp", with = "timestamp")]
    pub time_stamp: NaiveDateTime,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<DarlVar>,
}

impl DaslState {
    pub fn new(time_stamp: NaiveDateTime, values: Vec<DarlVar>) -> Self {
        Self { time_stamp, values }
    }

    /// Index the values by name
    ///
    /// Fails on the first repeated name instead of silently picking one.
    pub fn value_map(&self) -> Result<HashMap<&str, &DarlVar>, ExchangeError> {
        let mut map = HashMap::with_capacity(self.values.len());
        for var in &self.values {
            if map.insert(var.name.as_str(), var).is_some() {
                return Err(ExchangeError::DuplicateValue {
                    name: var.name.clone(),
                    time_stamp: self.time_stamp,
                });
            }
        }
        Ok(map)
    }
}

/// Kind of data held by a [`DarlVar`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Crisp or fuzzy number
    #[default]
    Numeric,
    /// Categories with confidences
    Categorical,
    /// Token sequences
    Textual,
}

impl DataType {
    fn from_ordinal(ordinal: u64) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Numeric),
            1 => Some(Self::Categorical),
            2 => Some(Self::Textual),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
            Self::Textual => write!(f, "textual"),
        }
    }
}

// The service may answer with ordinals rather than names.
impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DataTypeVisitor;

        impl serde::de::Visitor<'_> for DataTypeVisitor {
            type Value = DataType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a data type name or ordinal")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<DataType, E> {
                match v.to_ascii_lowercase().as_str() {
                    "numeric" => Ok(DataType::Numeric),
                    "categorical" => Ok(DataType::Categorical),
                    "textual" => Ok(DataType::Textual),
                    _ => Err(E::unknown_variant(
                        v,
                        &["numeric", "categorical", "textual"],
                    )),
                }
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<DataType, E> {
                DataType::from_ordinal(v)
                    .ok_or_else(|| E::custom(format!("unknown data type ordinal {}", v)))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<DataType, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(DataType::from_ordinal)
                    .ok_or_else(|| E::custom(format!("unknown data type ordinal {}", v)))
            }
        }

        deserializer.deserialize_any(DataTypeVisitor)
    }
}

/// Shape of a numeric envelope, by number of points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyShape {
    Crisp,
    Interval,
    Triangle,
    Trapezoid,
}

impl FuzzyShape {
    fn from_len(len: usize) -> Option<Self> {
        match len {
            1 => Some(Self::Crisp),
            2 => Some(Self::Interval),
            3 => Some(Self::Triangle),
            4 => Some(Self::Trapezoid),
            _ => None,
        }
    }
}

/// A data value with its uncertainty, from a fuzzy/possibilistic view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DarlVar {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// No determinate result; numeric fields carry nothing meaningful
    #[serde(default)]
    pub unknown: bool,
    /// Confidence placed in this value
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Ascending points of the fuzzy number (1 to 4 entries)
    #[serde(default)]
    pub values: Option<Vec<f64>>,
    /// Category label to truth value
    #[serde(default)]
    pub categories: Option<BTreeMap<String, f64>>,
    #[serde(default, with = "timestamp::optional_list")]
    pub times: Option<Vec<NaiveDateTime>>,
    /// The envelope in `values` is a reconstruction
    #[serde(default)]
    pub approximate: bool,
    #[serde(rename = "dataType", default)]
    pub data_type: DataType,
    #[serde(default)]
    pub sequence: Option<Vec<Vec<String>>>,
    /// Central or most confident value as text
    #[serde(rename = "Value", default, deserialize_with = "null_as_default")]
    pub value: String,
}

fn default_weight() -> f64 {
    1.0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DarlVar {
    fn empty(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            unknown: false,
            weight: default_weight(),
            values: None,
            categories: None,
            times: None,
            approximate: false,
            data_type,
            sequence: None,
            value: String::new(),
        }
    }

    /// A crisp number
    pub fn numeric(name: impl Into<String>, value: f64) -> Self {
        Self {
            values: Some(vec![value]),
            value: value.to_string(),
            ..Self::empty(name, DataType::Numeric)
        }
    }

    /// A fuzzy number given by its ascending envelope points
    pub fn fuzzy(name: impl Into<String>, points: Vec<f64>) -> Self {
        let central = points.get(points.len() / 2).map(f64::to_string);
        Self {
            values: Some(points),
            value: central.unwrap_or_default(),
            ..Self::empty(name, DataType::Numeric)
        }
    }

    /// Categories with truth values; the central value is the most confident label
    pub fn categorical(name: impl Into<String>, categories: BTreeMap<String, f64>) -> Self {
        let central = categories
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(label, _)| label.clone());
        Self {
            categories: Some(categories),
            value: central.unwrap_or_default(),
            ..Self::empty(name, DataType::Categorical)
        }
    }

    /// Token sequences; the central value is the first sequence joined by spaces
    pub fn textual(name: impl Into<String>, sequence: Vec<Vec<String>>) -> Self {
        let central = sequence.first().map(|tokens| tokens.join(" "));
        Self {
            sequence: Some(sequence),
            value: central.unwrap_or_default(),
            ..Self::empty(name, DataType::Textual)
        }
    }

    /// A value with no determinate result
    pub fn unknown(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            unknown: true,
            ..Self::empty(name, data_type)
        }
    }

    /// Replace the textual central value
    pub fn with_value_text(mut self, text: impl Into<String>) -> Self {
        self.value = text.into();
        self
    }

    /// First point of the numeric envelope, unless the value is unknown
    pub fn central(&self) -> Option<f64> {
        if self.unknown {
            return None;
        }
        self.values.as_deref().and_then(|v| v.first()).copied()
    }

    pub fn shape(&self) -> Option<FuzzyShape> {
        self.values
            .as_ref()
            .and_then(|values| FuzzyShape::from_len(values.len()))
    }

    /// Check the numeric and categorical invariants
    ///
    /// Unknown values are exempt since their payload is not meaningful.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.unknown {
            return Ok(());
        }
        let invalid = |reason: &str| ExchangeError::InvalidValue {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        match self.data_type {
            DataType::Numeric => {
                let values = self
                    .values
                    .as_deref()
                    .ok_or_else(|| invalid("numeric value has no points"))?;
                if FuzzyShape::from_len(values.len()).is_none() {
                    return Err(invalid("numeric value needs 1 to 4 points"));
                }
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(invalid("numeric value is not finite"));
                }
                if values.windows(2).any(|w| w[0] > w[1]) {
                    return Err(invalid("numeric points are not ascending"));
                }
            }
            DataType::Categorical => {
                if self.categories.as_ref().map_or(true, BTreeMap::is_empty) {
                    return Err(invalid("categorical value has no categories"));
                }
            }
            DataType::Textual => {}
        }
        Ok(())
    }
}

impl fmt::Display for DarlVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name = {}, datatype = {} Central value: {}, isUnknown = {}, confidence = {}",
            self.name, self.data_type, self.value, self.unknown, self.weight
        )?;
        match self.data_type {
            DataType::Numeric => {
                if let Some(values) = self.values.as_ref().filter(|v| v.len() > 1) {
                    let joined: Vec<String> = values.iter().map(f64::to_string).collect();
                    write!(f, " Fuzzy numeric values = {}", joined.join(","))?;
                }
            }
            DataType::Categorical => {
                if let Some(categories) = self.categories.as_ref().filter(|c| c.len() > 1) {
                    write!(f, " Fuzzy categorical values =")?;
                    for (label, truth) in categories {
                        write!(f, " category: {} confidence: {},", label, truth)?;
                    }
                }
            }
            DataType::Textual => {}
        }
        Ok(())
    }
}
