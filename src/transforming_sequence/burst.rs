#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::actions::Action;

/// Text produced without pausing for longer than the configured pause
/// duration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    /// The pause that preceded the burst, if it was logged.
    pub preceding_pause: Option<f64>,
    pub text: String,
}

/// Split the actions of a production group at every pause longer than
/// `pause_duration`. Actions without a logged pause continue the current
/// burst.
#[must_use]
pub fn decompose(actions: &[Action], pause_duration: f64) -> Vec<Burst> {
    let mut bursts = Vec::new();
    let mut current: Option<Burst> = None;

    for action in actions {
        match current.as_mut() {
            Some(burst) if action.pause.is_none_or(|pause| pause <= pause_duration) => {
                burst.text.push_str(&action.content);
            }
            _ => {
                bursts.extend(current.take());
                current = Some(Burst {
                    preceding_pause: action.pause,
                    text: action.content.clone(),
                });
            }
        }
    }

    bursts.extend(current);

    bursts
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn typed(content: &str, position: usize, pause: Option<f64>) -> Action {
        let time = position as f64;
        Action::append(content, position, position + 1).with_times(time, time + 0.1, pause)
    }

    #[test]
    fn test_long_pause_closes_burst() {
        let actions = vec![
            typed("a", 0, None),
            typed("b", 1, Some(0.5)),
            typed("c", 2, Some(0.5)),
            typed("d", 3, Some(3.0)),
            typed("e", 4, Some(0.5)),
        ];

        assert_eq!(
            decompose(&actions, 2.0),
            vec![
                Burst {
                    preceding_pause: None,
                    text: "abc".to_owned()
                },
                Burst {
                    preceding_pause: Some(3.0),
                    text: "de".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_pause_at_threshold_stays_within_burst() {
        let actions = vec![typed("a", 0, Some(4.0)), typed("b", 1, Some(2.0))];

        assert_eq!(
            decompose(&actions, 2.0),
            vec![Burst {
                preceding_pause: Some(4.0),
                text: "ab".to_owned()
            }]
        );
    }

    #[test]
    fn test_no_actions() {
        assert_eq!(decompose(&[], 2.0), Vec::new());
    }
}
