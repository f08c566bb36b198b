//! Interaction steps replayed against a [`Viewer`], in command-line order.

use mindview_core::{Point, Viewer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Toggle(String),
    /// `None` clicks empty canvas.
    Click(Option<String>),
    ClickAt(Point),
    Select(String),
    Deselect,
    Reveal(String),
    ExpandAll,
    CollapseAll,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid step `{input}`: {reason}")]
pub struct StepParseError {
    input: String,
    reason: &'static str,
}

impl StepParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg.trim())),
            None => (s, None),
        };
        let required = |arg: Option<&str>| -> Result<String, StepParseError> {
            match arg {
                Some(id) if !id.is_empty() => Ok(id.to_string()),
                _ => Err(StepParseError::new(s, "expected a node id after `:`")),
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "toggle" => Ok(Self::Toggle(required(arg)?)),
            "click" => Ok(Self::Click(
                arg.filter(|id| !id.is_empty()).map(str::to_string),
            )),
            "click-at" => {
                let Some((x, y)) = arg.and_then(|a| a.split_once(',')) else {
                    return Err(StepParseError::new(s, "expected `click-at:<x>,<y>`"));
                };
                let x = x.trim().parse::<f64>();
                let y = y.trim().parse::<f64>();
                match (x, y) {
                    (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => {
                        Ok(Self::ClickAt(Point::new(x, y)))
                    }
                    _ => Err(StepParseError::new(s, "coordinates must be finite numbers")),
                }
            }
            "select" => Ok(Self::Select(required(arg)?)),
            "deselect" => Ok(Self::Deselect),
            "reveal" => Ok(Self::Reveal(required(arg)?)),
            "expand-all" => Ok(Self::ExpandAll),
            "collapse-all" => Ok(Self::CollapseAll),
            _ => Err(StepParseError::new(s, "unknown step kind")),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toggle(id) => write!(f, "toggle:{id}"),
            Self::Click(Some(id)) => write!(f, "click:{id}"),
            Self::Click(None) => write!(f, "click"),
            Self::ClickAt(p) => write!(f, "click-at:{},{}", p.x, p.y),
            Self::Select(id) => write!(f, "select:{id}"),
            Self::Deselect => write!(f, "deselect"),
            Self::Reveal(id) => write!(f, "reveal:{id}"),
            Self::ExpandAll => write!(f, "expand-all"),
            Self::CollapseAll => write!(f, "collapse-all"),
        }
    }
}

pub fn apply(viewer: &mut Viewer, step: &Step) {
    tracing::debug!(%step, "applying step");
    match step {
        Step::Toggle(id) => {
            viewer.toggle(id);
        }
        Step::Click(target) => {
            viewer.click(target.as_deref());
        }
        Step::ClickAt(point) => {
            viewer.click_at(*point);
        }
        Step::Select(id) => {
            viewer.select(id);
        }
        Step::Deselect => viewer.clear_selection(),
        Step::Reveal(id) => {
            viewer.reveal(id);
        }
        Step::ExpandAll => viewer.expand_all(),
        Step::CollapseAll => viewer.collapse_all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        assert_eq!("toggle:a".parse(), Ok(Step::Toggle("a".into())));
        assert_eq!("click:b".parse(), Ok(Step::Click(Some("b".into()))));
        assert_eq!("click".parse(), Ok(Step::Click(None)));
        assert_eq!("click:".parse(), Ok(Step::Click(None)));
        assert_eq!(
            "click-at:-110, 120".parse(),
            Ok(Step::ClickAt(Point::new(-110.0, 120.0)))
        );
        assert_eq!("select:a1".parse(), Ok(Step::Select("a1".into())));
        assert_eq!("deselect".parse(), Ok(Step::Deselect));
        assert_eq!("reveal:a1".parse(), Ok(Step::Reveal("a1".into())));
        assert_eq!("expand-all".parse(), Ok(Step::ExpandAll));
        assert_eq!("Collapse-All".parse(), Ok(Step::CollapseAll));
    }

    #[test]
    fn ids_may_contain_colons() {
        assert_eq!(
            "toggle:topic:intro".parse(),
            Ok(Step::Toggle("topic:intro".into()))
        );
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!("toggle".parse::<Step>().is_err());
        assert!("toggle:".parse::<Step>().is_err());
        assert!("click-at:1".parse::<Step>().is_err());
        assert!("click-at:x,2".parse::<Step>().is_err());
        let err = "zoom:2".parse::<Step>().unwrap_err();
        assert_eq!(err.to_string(), "invalid step `zoom:2`: unknown step kind");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for step in [
            Step::Toggle("a".into()),
            Step::Click(None),
            Step::ClickAt(Point::new(1.5, -2.0)),
        ] {
            assert_eq!(step.to_string().parse(), Ok(step));
        }
    }
}
