//! Parser for `show flows` output.
//!
//! The output mixes three kinds of line in one stream: a column title, one
//! row per connection, and a summary table of connection counts. Dashed
//! separators and blank lines sit between them. Every line is run through
//! an ordered list of rules and the first rule that accepts it wins:
//!
//! 1. title (`T  Source  Destination  App  Rdn  Since`), consumed once
//! 2. separator (`-----`)
//! 3. flow row
//! 4. summary row (`Label:  all [v4 v6]`)
//!
//! Anything else is ignored. Unknown summary labels are dropped rather than
//! reported, so newer firmware with extra rows still parses.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use log::trace;
use regex::{Captures, Regex};
use serde::Serialize;

/// Token printed in the `Since` column for connections older than tracking.
pub const PRE_EXISTING: &str = "pre_existing";

const ADDR_PORT: &str = r"(?:\[[0-9A-Fa-f:.]+\]|\d+\.\d+\.\d+\.\d+):\d+";

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"T\s+Source\s+Destination\s+App\s+Rdn\s+Since").expect("valid title regex")
});

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-+\s*$").expect("valid separator regex"));

static FLOW: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        concat!(
            r"^\s*(?P<type>[A-Za-z]+)",
            r"\s+(?P<src>{addr})",
            r"\s+(?P<dst>{addr})",
            r"\s+(?P<app>.+?)",
            r"\s+(?:(?P<rdn>\d+)%\s+)?",
            r"(?P<since>{pre}|(?P<year>\d{{4}})/(?P<month>\d{{2}})/(?P<day>\d{{2}})",
            r"\s+(?P<hour>\d{{2}}):(?P<min>\d{{2}}):(?P<secs>\d{{2}}))\s*$",
        ),
        addr = ADDR_PORT,
        pre = PRE_EXISTING,
    );
    Regex::new(&pattern).expect("valid flow regex")
});

static COUNTS_V4_V6: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)\s+(\d+)$").expect("valid counts regex"));

static COUNTS_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)$").expect("valid count regex"));

/// Connection-count categories reported in the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SummaryCategory {
    #[serde(rename = "established optimized")]
    EstablishedOptimized,
    #[serde(rename = "rios only")]
    RiosOnly,
    #[serde(rename = "scps only")]
    ScpsOnly,
    #[serde(rename = "rios scps")]
    RiosScps,
    #[serde(rename = "tcp proxy")]
    TcpProxy,
    #[serde(rename = "packet_mode optimized")]
    PacketModeOptimized,
    #[serde(rename = "half_opened optimized")]
    HalfOpenedOptimized,
    #[serde(rename = "half_closed optimized")]
    HalfClosedOptimized,
    #[serde(rename = "establishing")]
    Establishing,
    #[serde(rename = "passthrough")]
    Passthrough,
    #[serde(rename = "passthrough intentional")]
    PassthroughIntentional,
    #[serde(rename = "passthrough unintentional")]
    PassthroughUnintentional,
    #[serde(rename = "passthrough unintentional packet_mode")]
    PassthroughUnintentionalPacketMode,
    #[serde(rename = "passthrough unintentional terminated")]
    PassthroughUnintentionalTerminated,
    #[serde(rename = "forwarded")]
    Forwarded,
    #[serde(rename = "discarded")]
    Discarded,
    #[serde(rename = "denied")]
    Denied,
    #[serde(rename = "total")]
    Total,
}

/// Printed summary label to category. Labels are matched exactly after trim.
const SUMMARY_LABELS: [(&str, SummaryCategory); 18] = [
    ("Established Optimized", SummaryCategory::EstablishedOptimized),
    ("RiOS Only (O)", SummaryCategory::RiosOnly),
    ("SCPS Only (SO)", SummaryCategory::ScpsOnly),
    ("RiOS+SCPS (RS)", SummaryCategory::RiosScps),
    ("TCP Proxy (TP)", SummaryCategory::TcpProxy),
    ("Packet-mode optimized (N)", SummaryCategory::PacketModeOptimized),
    ("Half-opened optimized (H)", SummaryCategory::HalfOpenedOptimized),
    ("Half-closed optimized (C)", SummaryCategory::HalfClosedOptimized),
    ("Establishing (E)", SummaryCategory::Establishing),
    ("Passthrough", SummaryCategory::Passthrough),
    ("Passthrough intentional (PI)", SummaryCategory::PassthroughIntentional),
    ("Passthrough unintentional (PU)", SummaryCategory::PassthroughUnintentional),
    ("Terminated", SummaryCategory::PassthroughUnintentionalTerminated),
    ("Packet-mode", SummaryCategory::PassthroughUnintentionalPacketMode),
    ("Forwarded (F)", SummaryCategory::Forwarded),
    ("Discarded (terminated)", SummaryCategory::Discarded),
    ("Denied (terminated)", SummaryCategory::Denied),
    ("Total", SummaryCategory::Total),
];

impl SummaryCategory {
    /// Every category, in table order.
    pub const ALL: [SummaryCategory; 18] = {
        let mut all = [SummaryCategory::Total; 18];
        let mut i = 0;
        while i < SUMMARY_LABELS.len() {
            all[i] = SUMMARY_LABELS[i].1;
            i += 1;
        }
        all
    };

    /// Resolve a printed label such as `Forwarded (F)`.
    pub fn from_label(label: &str) -> Option<Self> {
        SUMMARY_LABELS
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, category)| *category)
    }

    /// The normalised key, e.g. `passthrough intentional`.
    pub fn key(&self) -> &'static str {
        match self {
            SummaryCategory::EstablishedOptimized => "established optimized",
            SummaryCategory::RiosOnly => "rios only",
            SummaryCategory::ScpsOnly => "scps only",
            SummaryCategory::RiosScps => "rios scps",
            SummaryCategory::TcpProxy => "tcp proxy",
            SummaryCategory::PacketModeOptimized => "packet_mode optimized",
            SummaryCategory::HalfOpenedOptimized => "half_opened optimized",
            SummaryCategory::HalfClosedOptimized => "half_closed optimized",
            SummaryCategory::Establishing => "establishing",
            SummaryCategory::Passthrough => "passthrough",
            SummaryCategory::PassthroughIntentional => "passthrough intentional",
            SummaryCategory::PassthroughUnintentional => "passthrough unintentional",
            SummaryCategory::PassthroughUnintentionalPacketMode => {
                "passthrough unintentional packet_mode"
            }
            SummaryCategory::PassthroughUnintentionalTerminated => {
                "passthrough unintentional terminated"
            }
            SummaryCategory::Forwarded => "forwarded",
            SummaryCategory::Discarded => "discarded",
            SummaryCategory::Denied => "denied",
            SummaryCategory::Total => "total",
        }
    }
}

impl fmt::Display for SummaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Counts from one summary row. `v4`/`v6` are only set for three-column rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub all: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v4: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v6: Option<u64>,
}

impl Counts {
    pub fn all_only(all: u64) -> Self {
        Self {
            all,
            v4: None,
            v6: None,
        }
    }

    pub fn split(all: u64, v4: u64, v6: u64) -> Self {
        Self {
            all,
            v4: Some(v4),
            v6: Some(v6),
        }
    }
}

/// Summary table keyed by category.
pub type FlowSummary = BTreeMap<SummaryCategory, Counts>;

/// One side of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub address: IpAddr,
    pub port: u16,
}

impl Endpoint {
    /// Parse `10.0.0.1:80` or `[fe80::1]:80`.
    fn parse(token: &str) -> Option<Self> {
        let (address, port) = token.rsplit_once(':')?;
        let address = address.trim_start_matches('[').trim_end_matches(']');
        Some(Self {
            address: address.parse().ok()?,
            port: port.parse().ok()?,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address {
            IpAddr::V4(addr) => write!(f, "{}:{}", addr, self.port),
            IpAddr::V6(addr) => write!(f, "[{}]:{}", addr, self.port),
        }
    }
}

/// Calendar fields of a `Since` column timestamp, as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SinceTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub secs: u8,
}

impl SinceTime {
    /// Convert to a datetime, if the printed fields form a valid one.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year.into(), self.month.into(), self.day.into())?.and_hms_opt(
            self.hour.into(),
            self.min.into(),
            self.secs.into(),
        )
    }
}

/// When a flow started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Since {
    At(SinceTime),
    /// The connection predates the appliance's tracking window.
    PreExisting,
}

/// One connection row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowRecord {
    /// Flow type code such as `O`, `N` or `PI`.
    #[serde(rename = "type")]
    pub kind: String,
    pub source: Endpoint,
    pub destination: Endpoint,
    /// Application label; may contain spaces.
    pub app: String,
    /// Data reduction percentage, only printed for optimized flows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction: Option<u32>,
    pub since: Since,
}

/// Parsed `show flows` output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flows {
    pub flows_list: Vec<FlowRecord>,
    pub flows_summary: FlowSummary,
}

/// How a single line was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Title,
    Separator,
    Flow(FlowRecord),
    Summary(SummaryCategory, Counts),
}

/// Which kind of line a rule recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Column title; consulted until the first match only
    Title,
    Separator,
    Flow,
    Summary,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Title => "title",
            RuleKind::Separator => "separator",
            RuleKind::Flow => "flow",
            RuleKind::Summary => "summary",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classification rule.
#[derive(Clone, Copy)]
pub struct Rule {
    pub kind: RuleKind,
    pub apply: fn(&str) -> Option<Line>,
}

/// Classification rules in priority order.
pub const RULES: [Rule; 4] = [
    Rule {
        kind: RuleKind::Title,
        apply: title_line,
    },
    Rule {
        kind: RuleKind::Separator,
        apply: separator_line,
    },
    Rule {
        kind: RuleKind::Flow,
        apply: flow_line,
    },
    Rule {
        kind: RuleKind::Summary,
        apply: summary_line,
    },
];

pub fn title_line(line: &str) -> Option<Line> {
    TITLE.is_match(line).then_some(Line::Title)
}

pub fn separator_line(line: &str) -> Option<Line> {
    SEPARATOR.is_match(line).then_some(Line::Separator)
}

/// Match a connection row. Rows whose addresses do not parse are rejected.
pub fn flow_line(line: &str) -> Option<Line> {
    let caps = FLOW.captures(line)?;
    let source = Endpoint::parse(&caps["src"])?;
    let destination = Endpoint::parse(&caps["dst"])?;

    let since = if &caps["since"] == PRE_EXISTING {
        Since::PreExisting
    } else {
        Since::At(since_time(&caps)?)
    };

    let reduction = match caps.name("rdn") {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };

    Some(Line::Flow(FlowRecord {
        kind: caps["type"].to_string(),
        source,
        destination,
        app: caps["app"].to_string(),
        reduction,
        since,
    }))
}

fn since_time(caps: &Captures<'_>) -> Option<SinceTime> {
    Some(SinceTime {
        year: caps["year"].parse().ok()?,
        month: caps["month"].parse().ok()?,
        day: caps["day"].parse().ok()?,
        hour: caps["hour"].parse().ok()?,
        min: caps["min"].parse().ok()?,
        secs: caps["secs"].parse().ok()?,
    })
}

/// Match a summary row with a known label and one or three counts.
pub fn summary_line(line: &str) -> Option<Line> {
    let (label, value) = line.split_once(':')?;
    let category = SummaryCategory::from_label(label.trim())?;
    let value = value.trim();

    let counts = if let Some(caps) = COUNTS_V4_V6.captures(value) {
        Counts::split(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )
    } else {
        let caps = COUNTS_ALL.captures(value)?;
        Counts::all_only(caps[1].parse().ok()?)
    };

    Some(Line::Summary(category, counts))
}

/// Parse the output of `show flows <type>`.
///
/// Never fails: lines that no rule accepts are skipped. Flow rows do not
/// depend on the title having been seen first.
pub fn parse_flows(text: &str) -> Flows {
    let mut flows = Flows::default();
    let mut title_seen = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let classified = RULES
            .iter()
            .filter(|rule| !(title_seen && rule.kind == RuleKind::Title))
            .find_map(|rule| (rule.apply)(line).map(|parsed| (rule.kind, parsed)));

        let Some((rule, parsed)) = classified else {
            trace!("ignored: {line:?}");
            continue;
        };
        trace!("{rule}: {line:?}");

        match parsed {
            Line::Title => title_seen = true,
            Line::Separator => {}
            Line::Flow(record) => flows.flows_list.push(record),
            Line::Summary(category, counts) => {
                flows.flows_summary.insert(category, counts);
            }
        }
    }

    flows
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_FLOWS_ALL: &str = "\
T  Source                Destination           App     Rdn Since
--------------------------------------------------------------------------------
N  10.190.0.1:406        10.190.5.2:1003       UDPv4   99% 2014/02/10 23:58:01
O  192.168.0.1:80        192.168.5.1:80        SRDF_V2 11% 2014/02/01 00:00:01
O  192.168.221.1:1080    192.168.221.1:1080    CIFS     0% 2014/02/01 00:20:01
O  192.168.221.1:443     192.168.221.1:443     MAPI    99% 2014/02/01 00:21:01
N  192.168.221.1:1443    192.168.221.1:5543    TCPv4   99% 2014/02/10 23:56:01
N  10.190.0.1:1406       10.190.5.2:2003       FTP-DAT 59% 2014/02/01 00:00:01
--------------------------------------------------------------------------------
                                           All    V4     V6
---------------------------------------------------------------
Established Optimized:                     1      2      3

  RiOS Only (O):                           1      3      3
  SCPS Only (SO):                          11     22     33
  RiOS+SCPS (RS):                          1      2      3
  TCP Proxy (TP):                          1      2      3
  Packet-mode optimized (N):               11     22     33

Half-opened optimized (H):                 1      2      3
Half-closed optimized (C):                 11     22     33

Establishing (E):                          1      2      3
Passthrough :                              11     22     33

  Passthrough intentional (PI):            1      2      3
  Passthrough unintentional (PU):          11     22     33

    Terminated:                            1      2      3
    Packet-mode:                           11     22     33

Forwarded (F):                             1      2      3
Discarded (terminated):                    1
Denied (terminated):                       1
---------------------------------------------------------------

Total:                                     11     40      70
";

    const SHOW_FLOWS_PASSTHROUGH: &str = "\
T  Source                Destination           App     Rdn Since
--------------------------------------------------------------------------------
PI 10.3.2.54:40097       10.190.174.120:443    TCP     2014/01/02 06:00:50
PI 10.3.2.23:52618       10.190.174.121:443    TCP     2014/01/02 14:06:09
PI 10.18.32.131:49671    10.190.1.233:3389     TCP     2014/01/02 10:09:04
PI 10.3.2.24:42797       10.190.174.122:443    TCP     2014/01/02 13:58:04
PI 10.3.1.87:13729       10.190.174.123:443    TCP     2014/01/02 04:14:06
--------------------------------------------------------------------------------
                                           All    V4     V6
---------------------------------------------------------------
Passthrough :                              11     22     33

  Passthrough intentional (PI):            1      2      3
  Passthrough unintentional (PU):          11     22     33

    Terminated:                            1      2      3
    Packet-mode:                           11     22     33

Forwarded (F):                             1      2      3
---------------------------------------------------------------

Total:                                     11     40      70
";

    fn endpoint(s: &str) -> Endpoint {
        Endpoint::parse(s).unwrap()
    }

    fn at(year: u16, month: u8, day: u8, hour: u8, min: u8, secs: u8) -> Since {
        Since::At(SinceTime {
            year,
            month,
            day,
            hour,
            min,
            secs,
        })
    }

    #[test]
    fn test_all_flows() {
        let flows = parse_flows(SHOW_FLOWS_ALL);
        assert_eq!(flows.flows_list.len(), 6);

        let first = &flows.flows_list[0];
        assert_eq!(first.kind, "N");
        assert_eq!(first.source, endpoint("10.190.0.1:406"));
        assert_eq!(first.destination, endpoint("10.190.5.2:1003"));
        assert_eq!(first.app, "UDPv4");
        assert_eq!(first.reduction, Some(99));
        assert_eq!(first.since, at(2014, 2, 10, 23, 58, 1));

        let cifs = &flows.flows_list[2];
        assert_eq!(cifs.app, "CIFS");
        assert_eq!(cifs.reduction, Some(0));

        let kinds: Vec<_> = flows.flows_list.iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(kinds, vec!["N", "O", "O", "O", "N", "N"]);
        let apps: Vec<_> = flows.flows_list.iter().map(|f| f.app.as_str()).collect();
        assert_eq!(apps, vec!["UDPv4", "SRDF_V2", "CIFS", "MAPI", "TCPv4", "FTP-DAT"]);
    }

    #[test]
    fn test_all_summary() {
        let summary = parse_flows(SHOW_FLOWS_ALL).flows_summary;
        assert_eq!(summary.len(), 18);
        for category in SummaryCategory::ALL {
            assert!(summary.contains_key(&category), "missing {category}");
        }

        assert_eq!(summary[&SummaryCategory::EstablishedOptimized], Counts::split(1, 2, 3));
        assert_eq!(summary[&SummaryCategory::RiosOnly], Counts::split(1, 3, 3));
        assert_eq!(summary[&SummaryCategory::ScpsOnly], Counts::split(11, 22, 33));
        assert_eq!(summary[&SummaryCategory::Passthrough], Counts::split(11, 22, 33));
        assert_eq!(
            summary[&SummaryCategory::PassthroughUnintentionalTerminated],
            Counts::split(1, 2, 3)
        );
        assert_eq!(
            summary[&SummaryCategory::PassthroughUnintentionalPacketMode],
            Counts::split(11, 22, 33)
        );
        assert_eq!(summary[&SummaryCategory::Discarded], Counts::all_only(1));
        assert_eq!(summary[&SummaryCategory::Denied], Counts::all_only(1));
        assert_eq!(summary[&SummaryCategory::Total], Counts::split(11, 40, 70));
    }

    #[test]
    fn test_passthrough_flows_have_no_reduction() {
        let flows = parse_flows(SHOW_FLOWS_PASSTHROUGH);
        assert_eq!(flows.flows_list.len(), 5);

        let first = &flows.flows_list[0];
        assert_eq!(first.kind, "PI");
        assert_eq!(first.source.address, "10.3.2.54".parse::<IpAddr>().unwrap());
        assert_eq!(first.source.port, 40097);
        assert_eq!(first.destination, endpoint("10.190.174.120:443"));
        assert_eq!(first.app, "TCP");
        assert_eq!(first.reduction, None);
        assert_eq!(first.since, at(2014, 1, 2, 6, 0, 50));
        assert!(flows.flows_list.iter().all(|f| f.reduction.is_none()));

        assert_eq!(flows.flows_summary.len(), 7);
        assert_eq!(
            flows.flows_summary[&SummaryCategory::Forwarded],
            Counts::split(1, 2, 3)
        );
    }

    #[test]
    fn test_single_row_without_title() {
        let flows = parse_flows("PI 10.3.2.54:40097  10.190.174.120:443  TCP  2014/01/02 06:00:50");
        assert_eq!(flows.flows_list.len(), 1);
        let since = match flows.flows_list[0].since {
            Since::At(t) => t.to_datetime().unwrap(),
            Since::PreExisting => panic!("expected timestamp"),
        };
        assert_eq!(since.to_string(), "2014-01-02 06:00:50");
    }

    #[test]
    fn test_pre_existing_and_spaced_app() {
        let text = "O  10.0.0.1:445   10.0.0.2:1025   SMB signed 42% pre_existing\n";
        let flows = parse_flows(text);
        let flow = &flows.flows_list[0];
        assert_eq!(flow.app, "SMB signed");
        assert_eq!(flow.reduction, Some(42));
        assert_eq!(flow.since, Since::PreExisting);
    }

    #[test]
    fn test_ipv6_endpoints() {
        let text = "O  [2001:db8::1]:40000  [2001:db8::2]:443  HTTPS 80% 2014/02/01 00:00:01";
        let flows = parse_flows(text);
        let flow = &flows.flows_list[0];
        assert_eq!(flow.source.address, "2001:db8::1".parse::<IpAddr>().unwrap());
        assert_eq!(flow.source.port, 40000);
        assert_eq!(flow.destination.to_string(), "[2001:db8::2]:443");
    }

    #[test]
    fn test_malformed_rows_are_not_flows() {
        let text = "\
O  10.0.0.1        10.0.0.2:80     HTTP 10% 2014/02/01 00:00:01
O  10.0.0.1:99999  10.0.0.2:80     HTTP 10% 2014/02/01 00:00:01
O  10.0.0.1:80     10.0.0.2:80     HTTP 10% yesterday
";
        let flows = parse_flows(text);
        assert!(flows.flows_list.is_empty());
        assert!(flows.flows_summary.is_empty());
    }

    #[test]
    fn test_unknown_summary_rows_are_dropped() {
        let text = "\
Total:                                     11     40      70
Teleported (T):                            5      5       0
Forwarded (F):                             lots
forwarded (f):                             1
";
        let summary = parse_flows(text).flows_summary;
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[&SummaryCategory::Total], Counts::split(11, 40, 70));
    }

    #[test]
    fn test_summary_rows() {
        assert_eq!(
            summary_line("Total:                                     11     40      70"),
            Some(Line::Summary(SummaryCategory::Total, Counts::split(11, 40, 70)))
        );
        assert_eq!(
            summary_line("Discarded (terminated):                    1"),
            Some(Line::Summary(SummaryCategory::Discarded, Counts::all_only(1)))
        );
        assert_eq!(summary_line("    Terminated:   1  2"), None);
    }

    #[test]
    fn test_rules_in_isolation() {
        let title = "T  Source                Destination           App     Rdn Since";
        assert_eq!(title_line(title), Some(Line::Title));
        assert_eq!(separator_line("--------"), Some(Line::Separator));
        assert_eq!(separator_line("-- x --"), None);
        assert_eq!(flow_line(title), None);
        assert_eq!(summary_line("                     All    V4     V6"), None);
    }

    #[test]
    fn test_repeated_title_is_ignored() {
        let text = format!("{SHOW_FLOWS_PASSTHROUGH}\nT  Source  Destination  App  Rdn  Since\n");
        assert_eq!(parse_flows(&text), parse_flows(SHOW_FLOWS_PASSTHROUGH));
    }

    #[test]
    fn test_rule_order() {
        let kinds: Vec<_> = RULES.iter().map(|rule| rule.kind).collect();
        assert_eq!(
            kinds,
            [RuleKind::Title, RuleKind::Separator, RuleKind::Flow, RuleKind::Summary]
        );
        assert_eq!(RuleKind::Title.to_string(), "title");
    }

    #[test]
    fn test_title_matches_once() {
        // A title-shaped row after the title is not reclassified as a title,
        // so it reaches the later rules and is ignored there.
        let title = "T  Source                Destination           App     Rdn Since";
        let text = format!("{title}\n{title}\nTotal:    1    2    3\n");
        let flows = parse_flows(&text);
        assert!(flows.flows_list.is_empty());
        assert_eq!(flows.flows_summary[&SummaryCategory::Total], Counts::split(1, 2, 3));
        assert!((RULES[0].apply)(title).is_some());
    }

    #[test]
    fn test_serialize_summary_keys() {
        let json = serde_json::to_value(parse_flows(SHOW_FLOWS_ALL)).unwrap();
        assert_eq!(json["flows_summary"]["total"]["v6"], 70);
        assert_eq!(json["flows_summary"]["denied"], serde_json::json!({"all": 1}));
        assert_eq!(json["flows_list"][0]["type"], "N");
        assert_eq!(json["flows_list"][0]["since"]["at"]["year"], 2014);
    }
}
