use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use fractic_server_error::ServerError;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidIsoDateTime;

/// Accepts RFC 3339 timestamps (`2023-05-05T08:30:00Z`), offset-less
/// timestamps (read as UTC) and plain dates (midnight UTC). Always written
/// back as RFC 3339 UTC, with only as many fractional digits as needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IsoDateTimeModel(pub DateTime<Utc>);

impl FromStr for IsoDateTimeModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(IsoDateTimeModel(dt.with_timezone(&Utc)));
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(IsoDateTimeModel(ndt.and_utc()));
        }
        let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| InvalidIsoDateTime::with_debug(s, &e))?;
        Ok(IsoDateTimeModel(d.and_time(chrono::NaiveTime::MIN).and_utc()))
    }
}

impl<'de> Deserialize<'de> for IsoDateTimeModel {
    fn deserialize<D>(deserializer: D) -> Result<IsoDateTimeModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IsoDateTimeModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for IsoDateTimeModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<IsoDateTimeModel> for DateTime<Utc> {
    fn from(model: IsoDateTimeModel) -> Self {
        model.0
    }
}
