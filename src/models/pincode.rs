//! Modelo de Pincode
//!
//! Código postal numérico usado como origen y destino de una reserva.
//! Se acepta como número JSON o como texto con dígitos; cualquier otro valor
//! se rechaza en el borde de la API.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Código de ubicación no negativo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pincode(i32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid pincode")]
pub struct InvalidPincode(pub String);

impl Pincode {
    pub fn new(value: i64) -> Result<Self, InvalidPincode> {
        i32::try_from(value)
            .ok()
            .filter(|v| *v >= 0)
            .map(Pincode)
            .ok_or_else(|| InvalidPincode(value.to_string()))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl FromStr for Pincode {
    type Err = InvalidPincode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPincode(s.to_string()));
        }
        let value: i64 = trimmed.parse().map_err(|_| InvalidPincode(s.to_string()))?;
        Pincode::new(value)
    }
}

impl TryFrom<i32> for Pincode {
    type Error = InvalidPincode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Pincode::new(value as i64)
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Pincode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

struct PincodeVisitor;

impl<'de> Visitor<'de> for PincodeVisitor {
    type Value = Pincode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer pincode or a string of digits")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Pincode, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(InvalidPincode(v.to_string())))
            .and_then(|v| Pincode::new(v).map_err(E::custom))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Pincode, E> {
        Pincode::new(v).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Pincode, E> {
        Err(E::custom(InvalidPincode(v.to_string())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Pincode, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Pincode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PincodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_str() {
        assert_eq!("100001".parse::<Pincode>().unwrap().value(), 100001);
        assert_eq!(" 110005 ".parse::<Pincode>().unwrap().value(), 110005);
        assert!("".parse::<Pincode>().is_err());
        assert!("-5".parse::<Pincode>().is_err());
        assert!("10a01".parse::<Pincode>().is_err());
        assert!("1.5".parse::<Pincode>().is_err());
        assert!("99999999999".parse::<Pincode>().is_err());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: Pincode = serde_json::from_str("100020").unwrap();
        let from_string: Pincode = serde_json::from_str("\"100020\"").unwrap();
        assert_eq!(from_number, from_string);

        assert!(serde_json::from_str::<Pincode>("-1").is_err());
        assert!(serde_json::from_str::<Pincode>("100.5").is_err());
        assert!(serde_json::from_str::<Pincode>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Pincode>("null").is_err());
    }

    #[test]
    fn test_serialize_as_number() {
        let pin = Pincode::new(100001).unwrap();
        assert_eq!(serde_json::to_string(&pin).unwrap(), "100001");
    }
}
