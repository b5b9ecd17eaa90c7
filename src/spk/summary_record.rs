use std::fmt;

use hifitime::Epoch;
use nom::{
    number::complete::{le_f64, le_i32},
    IResult,
};

use super::{naif_ids::NaifBody, spk_type::SpkDataType};

/// Descriptor of one SPK segment, as stored in a DAF summary record.
///
/// Epochs are ET seconds past J2000, addresses are 1-based double precision
/// word indices into the file.
#[derive(Debug, PartialEq, Clone)]
pub struct Summary {
    pub start_epoch: f64,
    pub end_epoch: f64,
    pub target: i32,
    pub center: i32,
    pub frame_id: i32,
    pub data_type: i32,
    pub initial_addr: i32,
    pub final_addr: i32,
}

impl Summary {
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, start_epoch) = le_f64(input)?;
        let (input, end_epoch) = le_f64(input)?;

        let (input, target) = le_i32(input)?;
        let (input, center) = le_i32(input)?;
        let (input, frame_id) = le_i32(input)?;
        let (input, data_type) = le_i32(input)?;
        let (input, initial_addr) = le_i32(input)?;
        let (input, final_addr) = le_i32(input)?;
        Ok((
            input,
            Summary {
                start_epoch,
                end_epoch,
                target,
                center,
                frame_id,
                data_type,
                initial_addr,
                final_addr,
            },
        ))
    }

    pub fn covers(&self, et_seconds: f64) -> bool {
        et_seconds >= self.start_epoch && et_seconds <= self.end_epoch
    }
}

fn body_label(id: i32) -> String {
    NaifBody::from_id(id)
        .map(|body| body.to_string())
        .unwrap_or_else(|_| format!("NAIF {id}"))
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data_type = SpkDataType::from_i32(self.data_type)
            .map(|t| t.to_string())
            .unwrap_or_else(|_| format!("type {} (not supported)", self.data_type));

        let fields = [
            (
                "start_epoch",
                Epoch::from_et_seconds(self.start_epoch).to_string(),
            ),
            ("end_epoch", Epoch::from_et_seconds(self.end_epoch).to_string()),
            ("target", body_label(self.target)),
            ("center", body_label(self.center)),
            ("frame_id", self.frame_id.to_string()),
            ("data_type", data_type),
            ("initial_addr", self.initial_addr.to_string()),
            ("final_addr", self.final_addr.to_string()),
        ];

        let label_width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(10);
        let value_width = fields.iter().map(|(_, v)| v.len()).max().unwrap_or(10);

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = label_width + 2,
            value = value_width + 2
        );

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label_width$} | {:<value_width$} |",
            "Field", "Value",
        )?;
        writeln!(f, "{border}")?;

        for (label, value) in fields {
            writeln!(f, "| {label:<label_width$} | {value:<value_width$} |")?;
        }

        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod test_summary {
    use super::*;

    fn summary_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-14200747200.0f64).to_le_bytes());
        buf.extend_from_slice(&20514081600.0f64.to_le_bytes());
        for v in [10i32, 0, 1, 2, 2031, 3040] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    #[test]
    fn test_parse_summary() {
        let bytes = summary_bytes();
        let (rest, summary) = Summary::parse(&bytes).unwrap();
        assert!(rest.is_empty());
        assert_eq!(
            summary,
            Summary {
                start_epoch: -14200747200.0,
                end_epoch: 20514081600.0,
                target: 10,
                center: 0,
                frame_id: 1,
                data_type: 2,
                initial_addr: 2031,
                final_addr: 3040,
            }
        );
        assert!(summary.covers(0.0));
        assert!(!summary.covers(3.0e10));
    }

    #[test]
    fn test_summary_display() {
        let bytes = summary_bytes();
        let (_, summary) = Summary::parse(&bytes).unwrap();

        let output = format!("{summary}");
        let row = |label: &str| {
            output
                .lines()
                .find(|line| line.starts_with(&format!("| {label} ")))
                .unwrap_or_default()
                .to_string()
        };
        assert!(row("target").contains("| Sun "));
        assert!(row("center").contains("| Solar System Barycenter"));
        assert!(row("data_type").contains("| Chebyshev position (type 2)"));
        assert_eq!(output.lines().count(), 12);
    }
}
