// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

// Assorted helpers

/// Round value to 2 decimal places
pub fn fround2(val: f32) -> f32 {
    (val * 100.0).round() / 100.0
}

/// Clamp value to the [0, 100] score range, rounded to 2 decimal places
pub fn clamp_score(val: f32) -> f32 {
    fround2(val.max(0.0).min(100.0))
}

/// Compute a UUID from the MD5 hash of the object
///
/// Not a very robust scheme but it yields stable values for equal objects
pub fn uuid_from_obj(obj: &impl std::fmt::Debug) -> String {
    let h = format!("{:x}", md5::compute(format!("{:?}", obj).as_bytes()));
    format!(
        "{}-{}-{}-{}-{}",
        &h[0..8],
        &h[8..12],
        &h[12..16],
        &h[16..20],
        &h[20..32]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(fround2(81.2345), 81.23);
        assert_eq!(clamp_score(123.4), 100.0);
        assert_eq!(clamp_score(-3.0), 0.0);
    }

    #[test]
    fn stable_uuid() {
        let a = uuid_from_obj(&("plan", 1800));
        let b = uuid_from_obj(&("plan", 1800));
        assert_eq!(a, b);
        assert_eq!(a.len(), 36);
    }
}
