use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// How many outputs the recommendation endpoint produces: three courses
/// followed by their three confidence ratings.
const RECOMMENDATION_OUTPUTS: usize = 6;

#[derive(Debug, Error)]
#[error("expected {RECOMMENDATION_OUTPUTS} recommendation outputs, got {got}")]
pub struct ShapeMismatch {
    pub got: usize,
}

/// The recommendation payload in its fixed named form. Values pass
/// through from the Space untouched.
#[derive(Debug, Serialize, PartialEq)]
pub struct Recommendations {
    pub course1: Value,
    pub course2: Value,
    pub course3: Value,
    pub rating1: Value,
    pub rating2: Value,
    pub rating3: Value,
}

/// Maps the ordered recommendation outputs to their named fields by
/// position. Anything other than exactly six outputs is a shape error,
/// never a partial mapping.
pub fn shape_recommendations(outputs: Vec<Value>) -> Result<Recommendations, ShapeMismatch> {
    if outputs.len() != RECOMMENDATION_OUTPUTS {
        return Err(ShapeMismatch { got: outputs.len() });
    }

    let mut outputs = outputs.into_iter();
    Ok(Recommendations {
        course1: outputs.next().unwrap(),
        course2: outputs.next().unwrap(),
        course3: outputs.next().unwrap(),
        rating1: outputs.next().unwrap(),
        rating2: outputs.next().unwrap(),
        rating3: outputs.next().unwrap(),
    })
}

/// Collapses an output list the way the Space's own client library does:
/// a single output is returned bare, anything else stays a list.
pub fn single_output(mut outputs: Vec<Value>) -> Value {
    if outputs.len() == 1 {
        outputs.remove(0)
    } else {
        Value::Array(outputs)
    }
}
