//! Typed values for CLI fields and the key-driven coercion rules.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::error::ParseError;

/// Timestamp format used throughout the appliance CLI.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Keys holding an address, optionally with a `/prefix` suffix.
const ADDRESS_KEYS: &[&str] = &["ip address", "ipv6 address", "ipv6 link-local address"];

/// Keys holding a colon-separated hardware address.
const MAC_KEYS: &[&str] = &["hw address"];

/// Keys holding a `YYYY/MM/DD HH:MM:SS` timestamp.
const DATE_KEYS: &[&str] = &["counters cleared date"];

/// A single typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Empty cell. Serialises as `null`.
    NoData,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Interface(IpInterface),
    Mac(MacAddr),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Borrow the value as text, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Value::NoData)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::NoData => Ok(()),
            Value::Bool(true) => f.write_str("yes"),
            Value::Bool(false) => f.write_str("no"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Interface(iface) => write!(f, "{iface}"),
            Value::Mac(mac) => write!(f, "{mac}"),
            Value::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::NoData => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Text(s) => serializer.serialize_str(s),
            other => serializer.collect_str(other),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// An address together with its network prefix length, e.g. `10.3.2.54/21`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpInterface {
    addr: IpAddr,
    prefix_len: u8,
}

impl IpInterface {
    /// Create an interface address. Returns `None` if the prefix is too long
    /// for the address family.
    pub fn new(addr: IpAddr, prefix_len: u8) -> Option<Self> {
        let max = if addr.is_ipv4() { 32 } else { 128 };
        (prefix_len <= max).then_some(Self { addr, prefix_len })
    }

    /// Host route for the address (`/32` or `/128`).
    pub fn host(addr: IpAddr) -> Self {
        let prefix_len = if addr.is_ipv4() { 32 } else { 128 };
        Self { addr, prefix_len }
    }

    /// Combine an IPv4 address with a dotted netmask such as `255.255.248.0`.
    ///
    /// Non-contiguous masks are rejected.
    pub fn with_netmask(addr: IpAddr, netmask: Ipv4Addr) -> Option<Self> {
        let bits = u32::from(netmask);
        let prefix_len = bits.leading_ones();
        if bits.checked_shl(prefix_len).unwrap_or(0) != 0 {
            return None;
        }
        Self::new(addr, prefix_len as u8)
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl fmt::Display for IpInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl FromStr for IpInterface {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((addr, prefix)) => {
                let addr: IpAddr = addr.parse().map_err(|_| ())?;
                let prefix_len: u8 = prefix.parse().map_err(|_| ())?;
                Self::new(addr, prefix_len).ok_or(())
            }
            None => s.parse().map(Self::host).map_err(|_| ()),
        }
    }
}

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl FromStr for MacAddr {
    type Err = ();

    /// Accepts `:` or `-` separated hex octets in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split([':', '-']);
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or(())?;
            if part.is_empty() || part.len() > 2 {
                return Err(());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| ())?;
        }
        if parts.next().is_some() {
            return Err(());
        }
        Ok(Self(octets))
    }
}

/// Parse a fixed-format `YYYY/MM/DD HH:MM:SS` timestamp.
pub fn parse_timestamp(field: &str, raw: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        ParseError::InvalidTimestamp {
            field: field.to_string(),
            value: raw.to_string(),
        }
    })
}

/// Convert a raw token into a typed value, choosing the rule by field key.
///
/// Key-specific rules (addresses, hardware address, dates) take precedence
/// over the value-shaped ones (`yes`/`no`, all-digit integers). Empty text
/// always becomes [`Value::NoData`]. Only date fields can fail.
pub fn coerce(raw: &str, key: &str) -> Result<Value, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Value::NoData);
    }

    if ADDRESS_KEYS.contains(&key) {
        return Ok(match raw.parse::<IpInterface>() {
            Ok(iface) => Value::Interface(iface),
            Err(()) => {
                log::warn!("unparsable address for '{key}': {raw:?}");
                Value::Text(raw.to_string())
            }
        });
    }

    if MAC_KEYS.contains(&key) {
        return Ok(match raw.parse::<MacAddr>() {
            Ok(mac) => Value::Mac(mac),
            Err(()) => Value::Text(raw.to_string()),
        });
    }

    if DATE_KEYS.contains(&key) {
        return parse_timestamp(key, raw).map(Value::Timestamp);
    }

    Ok(coerce_plain(raw))
}

/// Value-shaped coercion with no key-specific rules.
fn coerce_plain(raw: &str) -> Value {
    match raw {
        "yes" => Value::Bool(true),
        "no" => Value::Bool(false),
        _ if raw.bytes().all(|b| b.is_ascii_digit()) => match raw.parse() {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Text(raw.to_string()),
        },
        _ => Value::Text(raw.to_string()),
    }
}
