use std::collections::HashMap;

use tracing::debug;

use crate::constant::FLAG_TOKEN;
use crate::model::ValueKind;
use crate::registry::{ParseError, Registration};
use crate::tokens::{Token, TokenKind};

/// Link every `Value` token to the option token which consumes it.
///
/// Single left-to-right pass.  Each option token must name a registration.
/// A non-positional match is marked `Found` and opens a claim: flags close
/// immediately (their boolean literal converts on the spot), scalars claim
/// the single next value, sequences claim greedily until the next option
/// token.  A mention of a positional registration is recognized but claims
/// nothing; its values always travel the candidate queue.  Values no claim
/// reaches stay unowned, to be served to the positional registrations later.
pub(crate) fn resolve<'t>(
    mut tokens: Vec<Token<'t>>,
    entries: &mut [Registration],
    by_name: &HashMap<String, usize>,
    by_short: &HashMap<char, usize>,
) -> Result<Vec<Token<'t>>, ParseError> {
    // The open claim: (option token index, greedy).
    let mut open: Option<(usize, bool)> = None;

    for index in 0..tokens.len() {
        match tokens[index].kind {
            TokenKind::LongOption | TokenKind::ShortOption => {
                let entry = lookup(&tokens[index], by_name, by_short)?;

                if entries[entry].positional() {
                    debug!(
                        "positional parameter '{}' mentioned by name",
                        entries[entry].name()
                    );
                    open = None;
                    continue;
                }

                entries[entry].mark_found();

                match entries[entry].kind() {
                    ValueKind::Flag => {
                        entries[entry].convert(FLAG_TOKEN, tokens[index].offset)?;
                        open = None;
                    }
                    ValueKind::Scalar => {
                        open = Some((index, false));
                    }
                    ValueKind::Sequence => {
                        open = Some((index, true));
                    }
                }
            }
            TokenKind::Value => {
                if let Some((owner, greedy)) = open {
                    tokens[index].owner = Some(owner);

                    if !greedy {
                        open = None;
                    }
                }
            }
        }
    }

    let candidates = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Value && token.owner.is_none())
        .count();
    debug!(
        "resolved {} tokens ({candidates} positional candidates)",
        tokens.len()
    );
    Ok(tokens)
}

fn lookup(
    token: &Token,
    by_name: &HashMap<String, usize>,
    by_short: &HashMap<char, usize>,
) -> Result<usize, ParseError> {
    let (index, display) = match token.kind {
        TokenKind::LongOption => (
            by_name.get(token.text).copied(),
            format!("--{}", token.text),
        ),
        TokenKind::ShortOption => {
            let short = token
                .text
                .chars()
                .next()
                .expect("internal error - short option token must hold a character");
            (by_short.get(&short).copied(), format!("-{}", token.text))
        }
        TokenKind::Value => unreachable!("internal error - value tokens are never looked up"),
    };

    match index {
        Some(index) => Ok(index),
        None => Err(ParseError::UnregisteredOption {
            name: display,
            offset: token.offset,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::registry::Specification;
    use crate::tokens::tokenize;

    struct Setup<'a> {
        entries: Vec<Registration<'a>>,
        by_name: HashMap<String, usize>,
        by_short: HashMap<char, usize>,
    }

    impl<'a> Setup<'a> {
        fn new() -> Self {
            let entries = vec![
                Specification::flag("verbose").short('v').erase().unwrap(),
                Specification::<u32>::scalar("limit").short('l').erase().unwrap(),
                Specification::<u32>::sequence("items").erase().unwrap(),
                Specification::<String>::scalar("path").short('p').positional().erase().unwrap(),
            ];
            let by_name = entries
                .iter()
                .enumerate()
                .map(|(index, entry)| (entry.name().to_string(), index))
                .collect();
            let by_short = entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| entry.short().map(|short| (short, index)))
                .collect();
            Self {
                entries,
                by_name,
                by_short,
            }
        }

        fn resolve<'t>(&mut self, arguments: &[&'t str]) -> Result<Vec<Token<'t>>, ParseError> {
            resolve(
                tokenize(arguments),
                &mut self.entries,
                &self.by_name,
                &self.by_short,
            )
        }
    }

    fn owners(tokens: &[Token]) -> Vec<Option<usize>> {
        tokens.iter().map(|token| token.owner).collect()
    }

    #[test]
    fn resolve_flag_converts_immediately() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["--verbose"]).unwrap();

        // Verify
        assert_eq!(owners(&tokens), vec![None]);
        assert_eq!(setup.entries[0].status(), Status::Initialized);
    }

    #[test]
    fn resolve_scalar_claims_next_value() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["--limit", "5", "rest"]).unwrap();

        // Verify
        assert_eq!(owners(&tokens), vec![None, Some(0), None]);
        assert_eq!(setup.entries[1].status(), Status::Found);
    }

    #[test]
    fn resolve_scalar_with_equals() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["--limit=5", "rest"]).unwrap();

        // Verify
        assert_eq!(owners(&tokens), vec![None, Some(0), None]);
    }

    #[test]
    fn resolve_sequence_greedy_until_option() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["--items", "1", "2", "--verbose", "3"]).unwrap();

        // Verify
        assert_eq!(
            owners(&tokens),
            vec![None, Some(0), Some(0), None, None]
        );
    }

    #[test]
    fn resolve_sequence_with_equals_stays_greedy() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["--items=1", "2"]).unwrap();

        // Verify
        assert_eq!(owners(&tokens), vec![None, Some(0), Some(0)]);
    }

    #[test]
    fn resolve_short_cluster() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["-vl", "5"]).unwrap();

        // Verify
        assert_eq!(owners(&tokens), vec![None, None, Some(1)]);
        assert_eq!(setup.entries[0].status(), Status::Initialized);
        assert_eq!(setup.entries[1].status(), Status::Found);
    }

    #[test]
    fn resolve_unclaimed_values() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["one", "--verbose", "two"]).unwrap();

        // Verify
        assert_eq!(owners(&tokens), vec![None, None, None]);
    }

    #[test]
    fn resolve_unregistered_long() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let error = setup.resolve(&["--moot"]).unwrap_err();

        // Verify
        assert_matches!(error, ParseError::UnregisteredOption { name, offset } => {
            assert_eq!(name, "--moot");
            assert_eq!(offset, 0);
        });
    }

    #[test]
    fn resolve_unregistered_short() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let error = setup.resolve(&["--verbose", "-f"]).unwrap_err();

        // Verify
        assert_matches!(error, ParseError::UnregisteredOption { name, offset } => {
            assert_eq!(name, "-f");
            assert_eq!(offset, 10);
        });
    }

    #[test]
    fn resolve_positional_mention_claims_nothing() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["--path", "one"]).unwrap();

        // Verify: the value stays a candidate, and recognition alone does not
        // advance the lifecycle.
        assert_eq!(owners(&tokens), vec![None, None]);
        assert_eq!(setup.entries[3].status(), Status::NotFound);
    }

    #[test]
    fn resolve_positional_mention_by_short() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["-p=one"]).unwrap();

        // Verify
        assert_eq!(owners(&tokens), vec![None, None]);
    }

    #[test]
    fn resolve_positional_mention_stops_greedy_claim() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let tokens = setup.resolve(&["--items", "1", "--path", "2"]).unwrap();

        // Verify
        assert_eq!(owners(&tokens), vec![None, Some(0), None, None]);
    }

    #[test]
    fn resolve_empty_long_option() {
        // Setup
        let mut setup = Setup::new();

        // Execute
        let error = setup.resolve(&["--"]).unwrap_err();

        // Verify
        assert_matches!(error, ParseError::UnregisteredOption { name, .. } => {
            assert_eq!(name, "--");
        });
    }
}
