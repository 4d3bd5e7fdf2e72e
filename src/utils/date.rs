pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        format!("{}", time.format(DATE_FMT)).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use crate::utils::date::DATE_FMT;

    #[tokio::test]
    async fn test_should_parse_wire_format() {
        let time = NaiveDateTime::parse_from_str("2024-02-11T11:11:11.5", DATE_FMT).expect("should parse");
        assert_eq!("2024-02-11T11:11:11.500", format!("{}", time.format(DATE_FMT)));
    }
}
