use crate::domain::RecommendedComponent;

/// Turns the model's reply into a parts list.
///
/// Parsing never fails: text the parser cannot read yields an empty or
/// partial list, since the model's output format is not guaranteed.
pub trait BuildParser: Send + Sync {
    fn parse(&self, response: &str) -> Vec<RecommendedComponent>;

    fn name(&self) -> &str;
}
