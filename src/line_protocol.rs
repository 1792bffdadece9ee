//! InfluxDB line protocol encoding.
//!
//! One line per point: `measurement field=value[,field=value...]`. No tags
//! and no timestamp; the server stamps points on arrival.

use crate::store::DataPoint;
use std::fmt::Write;

fn push_escaped(out: &mut String, text: &str, special: &[char]) {
    for c in text.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Encode `points`, newline terminated.
///
/// InfluxDB rejects NaN and infinities, so non-finite fields are left out and
/// a point with no finite field is skipped entirely.
pub fn encode(points: &[DataPoint]) -> String {
    let mut out = String::new();
    for point in points {
        let mut fields = point.fields.iter().filter(|(_, value)| value.is_finite());
        let Some((key, value)) = fields.next() else {
            continue;
        };
        push_escaped(&mut out, point.measurement, &[',', ' ']);
        out.push(' ');
        push_escaped(&mut out, key, &[',', '=', ' ']);
        // writing into a String cannot fail
        let _ = write!(out, "={value}");
        for (key, value) in fields {
            out.push(',');
            push_escaped(&mut out, key, &[',', '=', ' ']);
            let _ = write!(out, "={value}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::encode;
    use crate::{accel::AccelF64, store::DataPoint};

    #[test]
    fn test_acceleration_point() {
        let point = DataPoint::acceleration(&AccelF64::new(0.5, -1.25, 9.80665));
        assert_eq!(
            encode(&[point]),
            "adxl355_measure x-axis=0.5,y-axis=-1.25,z-axis=9.80665\n"
        );
    }

    #[test]
    fn test_escaping() {
        let point = DataPoint {
            measurement: "my measure,1",
            fields: vec![("a=b c", 1.0)],
        };
        assert_eq!(encode(&[point]), "my\\ measure\\,1 a\\=b\\ c=1\n");
    }

    #[test]
    fn test_non_finite_fields_dropped() {
        let points = [
            DataPoint::acceleration(&AccelF64::new(f64::NAN, 2.0, f64::INFINITY)),
            DataPoint {
                measurement: "empty",
                fields: vec![("x", f64::NAN)],
            },
        ];
        assert_eq!(encode(&points), "adxl355_measure y-axis=2\n");
    }
}
