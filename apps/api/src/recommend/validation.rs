use serde_json::{Map, Value};
use thiserror::Error;

/// Academic strands accepted by the recommendation form, in display order.
pub const VALID_STRANDS: &[&str] = &["STEM", "ABM", "HUMSS", "GAS", "TVL"];

/// The two rating literals the Space understands.
pub const RATING_LIKE: &str = "👍 Like";
pub const RATING_DISLIKE: &str = "👎 Dislike";

/// Required fields of the recommendation form, in declared order.
pub const RECOMMENDATION_FIELDS: &[&str] = &["stanine", "gwa", "strand", "hobbies"];

/// Required fields of the rating form, in declared order.
pub const RATING_FIELDS: &[&str] = &["course1_rating", "course2_rating", "course3_rating"];

const STANINE_MIN: i64 = 1;
const STANINE_MAX: i64 = 9;
const GWA_MIN: f64 = 75.0;
const GWA_MAX: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("{field} must be a valid number")]
    InvalidNumber { field: &'static str },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: &'static str,
        max: &'static str,
    },

    #[error("Invalid strand. Must be one of: STEM, ABM, HUMSS, GAS, TVL")]
    InvalidStrand,

    #[error("Invalid rating for {0}. Must be \"👍 Like\" or \"👎 Dislike\"")]
    InvalidRating(String),
}

/// A recommendation request that passed every check and is ready to forward.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub stanine: i64,
    pub gwa: f64,
    pub strand: String,
    pub hobbies: String,
}

impl RecommendationRequest {
    /// Positional arguments for the Space, in endpoint signature order.
    /// Numbers are forwarded as strings, the way the form submits them.
    pub fn forwarded_args(&self) -> Vec<Value> {
        vec![
            Value::String(self.stanine.to_string()),
            Value::String(format_gwa(self.gwa)),
            Value::String(self.strand.clone()),
            Value::String(self.hobbies.clone()),
        ]
    }
}

/// A rating submission with all three literals verified.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSubmission {
    pub course1_rating: String,
    pub course2_rating: String,
    pub course3_rating: String,
}

impl RatingSubmission {
    pub fn forwarded_args(&self) -> Vec<Value> {
        vec![
            Value::String(self.course1_rating.clone()),
            Value::String(self.course2_rating.clone()),
            Value::String(self.course3_rating.clone()),
        ]
    }
}

/// Presence pass: reports the first field (in declared order) that is
/// absent or empty. A numeric zero counts as present so range checks can
/// reject it with a better message.
pub fn require_fields(
    data: &Map<String, Value>,
    required: &[&str],
) -> Result<(), ValidationError> {
    for &field in required {
        let present = match data.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Bool(b)) => *b,
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Number(_)) => true,
        };
        if !present {
            return Err(ValidationError::MissingField(field.to_string()));
        }
    }
    Ok(())
}

/// Presence pass for the rating form: key presence only. A present but
/// unrecognized value falls through to the enum check.
pub fn require_keys(data: &Map<String, Value>, required: &[&str]) -> Result<(), ValidationError> {
    for &field in required {
        if !data.contains_key(field) {
            return Err(ValidationError::MissingField(field.to_string()));
        }
    }
    Ok(())
}

/// Full validation of the recommendation form: presence first, then
/// per-field checks in declared order.
pub fn parse_recommendation_request(
    data: &Map<String, Value>,
) -> Result<RecommendationRequest, ValidationError> {
    require_fields(data, RECOMMENDATION_FIELDS)?;

    let stanine = parse_integer(&data["stanine"], "Stanine score")?;
    if !(STANINE_MIN..=STANINE_MAX).contains(&stanine) {
        return Err(ValidationError::OutOfRange {
            field: "Stanine score",
            min: "1",
            max: "9",
        });
    }

    let gwa = parse_float(&data["gwa"], "GWA")?;
    if !(GWA_MIN..=GWA_MAX).contains(&gwa) {
        return Err(ValidationError::OutOfRange {
            field: "GWA",
            min: "75",
            max: "100",
        });
    }

    let strand = match &data["strand"] {
        Value::String(s) if VALID_STRANDS.contains(&s.as_str()) => s.clone(),
        _ => return Err(ValidationError::InvalidStrand),
    };

    let hobbies = stringify(&data["hobbies"]);

    Ok(RecommendationRequest {
        stanine,
        gwa,
        strand,
        hobbies,
    })
}

/// Full validation of the rating form: key presence, then the two-literal
/// enum check per field in declared order.
pub fn parse_rating_submission(
    data: &Map<String, Value>,
) -> Result<RatingSubmission, ValidationError> {
    require_keys(data, RATING_FIELDS)?;

    let mut ratings = Vec::with_capacity(RATING_FIELDS.len());
    for &field in RATING_FIELDS {
        match &data[field] {
            Value::String(s) if s == RATING_LIKE || s == RATING_DISLIKE => {
                ratings.push(s.clone());
            }
            _ => return Err(ValidationError::InvalidRating(field.to_string())),
        }
    }

    let mut ratings = ratings.into_iter();
    Ok(RatingSubmission {
        course1_rating: ratings.next().unwrap(),
        course2_rating: ratings.next().unwrap(),
        course3_rating: ratings.next().unwrap(),
    })
}

/// Integer coercion matching the form's behavior: integer numbers pass,
/// fractional numbers truncate, decimal strings parse after trimming.
fn parse_integer(value: &Value, field: &'static str) -> Result<i64, ValidationError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                Ok(f.trunc() as i64)
            } else {
                Err(ValidationError::InvalidNumber { field })
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidNumber { field }),
        _ => Err(ValidationError::InvalidNumber { field }),
    }
}

fn parse_float(value: &Value, field: &'static str) -> Result<f64, ValidationError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or(ValidationError::InvalidNumber { field }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidNumber { field }),
        _ => Err(ValidationError::InvalidNumber { field }),
    }
}

/// GWA is forwarded the way it reads: whole values without a trailing
/// fraction, fractional values as-is.
fn format_gwa(gwa: f64) -> String {
    if gwa.fract() == 0.0 {
        format!("{}", gwa as i64)
    } else {
        gwa.to_string()
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn valid_request() -> Map<String, Value> {
        obj(json!({
            "stanine": 7,
            "gwa": 90.5,
            "strand": "STEM",
            "hobbies": "coding",
        }))
    }

    #[test]
    fn test_valid_request_passes() {
        let req = parse_recommendation_request(&valid_request()).unwrap();
        assert_eq!(req.stanine, 7);
        assert_eq!(req.gwa, 90.5);
        assert_eq!(req.strand, "STEM");
        assert_eq!(req.hobbies, "coding");
    }

    #[test]
    fn test_string_numbers_accepted() {
        let mut data = valid_request();
        data.insert("stanine".to_string(), json!("7"));
        data.insert("gwa".to_string(), json!(" 90.5 "));
        let req = parse_recommendation_request(&data).unwrap();
        assert_eq!(req.stanine, 7);
        assert_eq!(req.gwa, 90.5);
    }

    #[test]
    fn test_missing_field_reported_in_declared_order() {
        let data = obj(json!({ "gwa": 90.5 }));
        assert_eq!(
            parse_recommendation_request(&data).unwrap_err(),
            ValidationError::MissingField("stanine".to_string())
        );

        let data = obj(json!({ "stanine": 7, "gwa": 90.5 }));
        assert_eq!(
            parse_recommendation_request(&data).unwrap_err(),
            ValidationError::MissingField("strand".to_string())
        );
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut data = valid_request();
        data.insert("hobbies".to_string(), json!(""));
        assert_eq!(
            parse_recommendation_request(&data).unwrap_err(),
            ValidationError::MissingField("hobbies".to_string())
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut data = valid_request();
        data.insert("strand".to_string(), Value::Null);
        assert_eq!(
            parse_recommendation_request(&data).unwrap_err(),
            ValidationError::MissingField("strand".to_string())
        );
    }

    #[test]
    fn test_stanine_zero_hits_range_check_not_presence() {
        let mut data = valid_request();
        data.insert("stanine".to_string(), json!(0));
        let err = parse_recommendation_request(&data).unwrap_err();
        assert_eq!(err.to_string(), "Stanine score must be between 1 and 9");
    }

    #[test]
    fn test_stanine_ten_out_of_range() {
        let mut data = valid_request();
        data.insert("stanine".to_string(), json!(10));
        let err = parse_recommendation_request(&data).unwrap_err();
        assert_eq!(err.to_string(), "Stanine score must be between 1 and 9");
    }

    #[test]
    fn test_stanine_not_a_number() {
        let mut data = valid_request();
        data.insert("stanine".to_string(), json!("abc"));
        let err = parse_recommendation_request(&data).unwrap_err();
        assert_eq!(err.to_string(), "Stanine score must be a valid number");
    }

    #[test]
    fn test_stanine_boundaries_accepted() {
        for stanine in [1, 9] {
            let mut data = valid_request();
            data.insert("stanine".to_string(), json!(stanine));
            assert!(parse_recommendation_request(&data).is_ok());
        }
    }

    #[test]
    fn test_gwa_below_range() {
        let mut data = valid_request();
        data.insert("gwa".to_string(), json!(74.9));
        let err = parse_recommendation_request(&data).unwrap_err();
        assert_eq!(err.to_string(), "GWA must be between 75 and 100");
    }

    #[test]
    fn test_gwa_above_range() {
        let mut data = valid_request();
        data.insert("gwa".to_string(), json!(100.1));
        let err = parse_recommendation_request(&data).unwrap_err();
        assert_eq!(err.to_string(), "GWA must be between 75 and 100");
    }

    #[test]
    fn test_gwa_not_a_number() {
        let mut data = valid_request();
        data.insert("gwa".to_string(), json!("high"));
        let err = parse_recommendation_request(&data).unwrap_err();
        assert_eq!(err.to_string(), "GWA must be a valid number");
    }

    #[test]
    fn test_gwa_boundaries_accepted() {
        for gwa in [75.0, 100.0] {
            let mut data = valid_request();
            data.insert("gwa".to_string(), json!(gwa));
            assert!(parse_recommendation_request(&data).is_ok());
        }
    }

    #[test]
    fn test_unknown_strand_rejected() {
        let mut data = valid_request();
        data.insert("strand".to_string(), json!("FOO"));
        let err = parse_recommendation_request(&data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid strand. Must be one of: STEM, ABM, HUMSS, GAS, TVL"
        );
    }

    #[test]
    fn test_strand_is_case_sensitive() {
        let mut data = valid_request();
        data.insert("strand".to_string(), json!("stem"));
        assert_eq!(
            parse_recommendation_request(&data).unwrap_err(),
            ValidationError::InvalidStrand
        );
    }

    #[test]
    fn test_all_strands_accepted() {
        for strand in VALID_STRANDS {
            let mut data = valid_request();
            data.insert("strand".to_string(), json!(strand));
            assert!(parse_recommendation_request(&data).is_ok());
        }
    }

    #[test]
    fn test_forwarded_args_are_strings() {
        let req = parse_recommendation_request(&valid_request()).unwrap();
        assert_eq!(
            req.forwarded_args(),
            vec![json!("7"), json!("90.5"), json!("STEM"), json!("coding")]
        );
    }

    #[test]
    fn test_whole_gwa_forwarded_without_fraction() {
        let mut data = valid_request();
        data.insert("gwa".to_string(), json!(90));
        let req = parse_recommendation_request(&data).unwrap();
        assert_eq!(req.forwarded_args()[1], json!("90"));
    }

    #[test]
    fn test_valid_ratings_pass() {
        let data = obj(json!({
            "course1_rating": RATING_LIKE,
            "course2_rating": RATING_DISLIKE,
            "course3_rating": RATING_LIKE,
        }));
        let submission = parse_rating_submission(&data).unwrap();
        assert_eq!(submission.course2_rating, RATING_DISLIKE);
    }

    #[test]
    fn test_missing_rating_key() {
        let data = obj(json!({
            "course1_rating": RATING_LIKE,
            "course3_rating": RATING_LIKE,
        }));
        assert_eq!(
            parse_rating_submission(&data).unwrap_err(),
            ValidationError::MissingField("course2_rating".to_string())
        );
    }

    #[test]
    fn test_unrecognized_rating_value() {
        let data = obj(json!({
            "course1_rating": RATING_LIKE,
            "course2_rating": "meh",
            "course3_rating": RATING_LIKE,
        }));
        let err = parse_rating_submission(&data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid rating for course2_rating. Must be \"👍 Like\" or \"👎 Dislike\""
        );
    }

    #[test]
    fn test_empty_rating_is_invalid_not_missing() {
        let data = obj(json!({
            "course1_rating": "",
            "course2_rating": RATING_LIKE,
            "course3_rating": RATING_LIKE,
        }));
        assert_eq!(
            parse_rating_submission(&data).unwrap_err(),
            ValidationError::InvalidRating("course1_rating".to_string())
        );
    }

    #[test]
    fn test_non_string_hobbies_forwarded_as_text() {
        let mut data = valid_request();
        data.insert("hobbies".to_string(), json!(42));
        let req = parse_recommendation_request(&data).unwrap();
        assert_eq!(req.hobbies, "42");
    }
}
