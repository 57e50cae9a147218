use crate::api::{Entry, ParseResult, Specification};
use crate::constant::*;
use crate::matcher::model::*;
use crate::model::{Arity, InvalidConversion, Value};
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// What the caller should do after feeding a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Feed {
    Continue,
    Help,
}

enum Resolution {
    Option(usize),
    Help,
}

/// Matches tokens, one at a time, against a frozen specification.
#[derive(Debug)]
pub(crate) struct TokenMatcher<'s> {
    specification: &'s Specification,
    abbreviations: bool,
    options: Vec<CaptureBuffer>,
    positionals: Vec<CaptureBuffer>,
    next_positional: usize,
    pending: Option<Pending>,
    only_positionals: bool,
    fed: usize,
}

impl<'s> TokenMatcher<'s> {
    pub(crate) fn new(specification: &'s Specification, abbreviations: bool) -> Self {
        let options = specification
            .options
            .iter()
            .map(|option| {
                let retain = match option.arity() {
                    Arity::Multi => Retain::All,
                    Arity::Flag | Arity::Single => Retain::Last,
                };
                CaptureBuffer::new(option.value_type(), retain)
            })
            .collect();
        let positionals = specification
            .positionals
            .iter()
            .map(|positional| {
                let retain = if positional.is_variadic() {
                    Retain::All
                } else {
                    Retain::Last
                };
                CaptureBuffer::new(positional.value_type(), retain)
            })
            .collect();

        Self {
            specification,
            abbreviations,
            options,
            positionals,
            next_positional: 0,
            pending: None,
            only_positionals: false,
            fed: 0,
        }
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<Feed, ParseError> {
        let index = self.fed;
        self.fed += 1;

        // 1. A pending option takes this token as its value, no matter its shape.
        if let Some(Pending { option, .. }) = self.pending.take() {
            self.capture_option(option, index, token)?;
            return Ok(Feed::Continue);
        }

        // Empty tokens carry nothing to match.
        if token.is_empty() {
            return Ok(Feed::Continue);
        }

        if self.only_positionals {
            self.match_positional(index, token)?;
            return Ok(Feed::Continue);
        }

        // 2. Find the end of options, a 'long' flag, or 'short' flag(s), such as:
        //  --
        //  --initial
        //  --initial=..
        //  -i
        //  -i..
        //  -i=..
        //  -iv..
        // 3. Match against a positional.
        if token == END_OF_OPTIONS {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Token #{index} ends the options.");
            }

            self.only_positionals = true;
            Ok(Feed::Continue)
        } else if let Some(body) = token.strip_prefix(LONG_PREFIX) {
            self.match_option(index, token, split_value_delimiter(body))
        } else if let Some(body) = token.strip_prefix(SHORT_PREFIX) {
            if body.is_empty() || self.is_negative_number(body) {
                self.match_positional(index, token)?;
                Ok(Feed::Continue)
            } else {
                self.match_option_short(index, token, body)
            }
        } else {
            self.match_positional(index, token)?;
            Ok(Feed::Continue)
        }
    }

    fn is_negative_number(&self, body: &str) -> bool {
        match body.chars().next() {
            Some(first) => {
                (first.is_ascii_digit() || first == '.')
                    && self.specification.find_short(first).is_none()
                    && body.parse::<f64>().is_ok()
            }
            None => false,
        }
    }

    fn match_option(
        &mut self,
        index: usize,
        token: &str,
        (name, inline): (&str, Option<&str>),
    ) -> Result<Feed, ParseError> {
        match self.resolve_long(index, token, name)? {
            Resolution::Help => Ok(Feed::Help),
            Resolution::Option(option) => {
                self.open(option, index, inline)?;
                Ok(Feed::Continue)
            }
        }
    }

    fn resolve_long(&self, index: usize, token: &str, name: &str) -> Result<Resolution, ParseError> {
        if let Some(option) = self.specification.find_long(name) {
            return Ok(Resolution::Option(option));
        }

        if self.specification.help && name == HELP_NAME {
            return Ok(Resolution::Help);
        }

        if self.abbreviations && !name.is_empty() {
            let candidates = self.specification.long_candidates(name);

            match candidates.as_slice() {
                [] => {}
                [single] if *single == HELP_NAME && self.specification.help => {
                    return Ok(Resolution::Help);
                }
                [single] => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Abbreviation '{name}' resolves to '{single}'.");
                    }

                    let option = self
                        .specification
                        .find_long(single)
                        .expect("internal error - candidates must be registered");
                    return Ok(Resolution::Option(option));
                }
                _ => {
                    return Err(ParseError::AmbiguousOption {
                        index,
                        token: token.to_string(),
                        candidates: candidates.iter().map(|c| c.to_string()).collect(),
                    });
                }
            }
        }

        Err(ParseError::UnknownOption {
            index,
            token: token.to_string(),
            name: name.to_string(),
        })
    }

    fn match_option_short(
        &mut self,
        index: usize,
        token: &str,
        body: &str,
    ) -> Result<Feed, ParseError> {
        for (position, single) in body.char_indices() {
            let option = match self.specification.find_short(single) {
                Some(option) => option,
                None if self.specification.help && single == HELP_SHORT => {
                    return Ok(Feed::Help);
                }
                None => {
                    return Err(ParseError::UnknownOption {
                        index,
                        token: token.to_string(),
                        name: single.to_string(),
                    });
                }
            };
            let rest = &body[position + single.len_utf8()..];

            if self.specification.options[option].arity().takes_value() {
                // The remainder of the token (if any) is the value: '-sVALUE' or '-s=VALUE'.
                let inline = if rest.is_empty() {
                    None
                } else {
                    Some(rest.strip_prefix(VALUE_DELIMITER).unwrap_or(rest))
                };
                self.open(option, index, inline)?;
                return Ok(Feed::Continue);
            } else if let Some(value) = rest.strip_prefix(VALUE_DELIMITER) {
                // Only the final flag may be given a value: '-abc=false'.
                self.open(option, index, Some(value))?;
                return Ok(Feed::Continue);
            } else {
                self.open(option, index, None)?;
            }
        }

        Ok(Feed::Continue)
    }

    fn open(&mut self, option: usize, index: usize, inline: Option<&str>) -> Result<(), ParseError> {
        let arity = self.specification.options[option].arity();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Token #{index} opens option '{}' ({arity}).",
                self.specification.options[option].name()
            );
        }

        self.options[option].occur();

        match (arity, inline) {
            (_, Some(value)) => self.capture_option(option, index, value)?,
            (Arity::Flag, None) => self.options[option].push(Value::Boolean(true)),
            (Arity::Single | Arity::Multi, None) => {
                if self.pending.replace(Pending { option, index }).is_some() {
                    unreachable!("internal error - a pending option must consume the next token");
                }
            }
        };

        Ok(())
    }

    fn capture_option(&mut self, option: usize, index: usize, token: &str) -> Result<(), ParseError> {
        self.options[option].capture(token).map_err(|error| {
            type_conversion(index, self.specification.options[option].name(), error)
        })
    }

    fn match_positional(&mut self, index: usize, token: &str) -> Result<(), ParseError> {
        let specification = self.specification;
        let positional = match specification.positionals.get(self.next_positional) {
            Some(positional) => positional,
            None => {
                return Err(ParseError::UnexpectedPositional {
                    index,
                    token: token.to_string(),
                });
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token #{index} matches positional '{}'.", positional.name());
        }

        let buffer = &mut self.positionals[self.next_positional];
        buffer.occur();
        buffer
            .capture(token)
            .map_err(|error| type_conversion(index, positional.name(), error))?;

        // Flip to the next positional, unless this one absorbs the remainder.
        if !positional.is_variadic() {
            self.next_positional += 1;
        }

        Ok(())
    }

    pub(crate) fn close(self) -> Result<ParseResult, ParseError> {
        let TokenMatcher {
            specification,
            options,
            positionals,
            pending,
            fed,
            ..
        } = self;

        if let Some(Pending { option, index }) = pending {
            return Err(ParseError::MissingValue {
                index,
                name: specification.options[option].name().to_string(),
            });
        }

        let mut result = ParseResult::default();
        let mut missing = Vec::default();

        for (option, buffer) in specification.options.iter().zip(options) {
            let occurrences = buffer.occurrences();

            if option.is_required() && buffer.is_empty() && option.default_value().is_none() {
                missing.push(option.name().to_string());
            }

            let entry = match (option.arity(), option.default_value()) {
                // An absent flag is false, unless declared otherwise.
                (Arity::Flag, None) if buffer.is_empty() => Entry::Single(Value::Boolean(false)),
                (_, default) => buffer.close(default),
            };
            result.insert(option.name(), entry, occurrences);
        }

        for (positional, buffer) in specification.positionals.iter().zip(positionals) {
            let occurrences = buffer.occurrences();

            if positional.is_required() && buffer.is_empty() {
                missing.push(positional.name().to_string());
            }

            result.insert(positional.name(), buffer.close(None), occurrences);
        }

        if missing.is_empty() {
            Ok(result)
        } else {
            Err(ParseError::MissingRequired {
                index: fed,
                names: missing,
            })
        }
    }
}

fn type_conversion(index: usize, name: &str, error: InvalidConversion) -> ParseError {
    ParseError::TypeConversion {
        index,
        name: name.to_string(),
        token: error.token().to_string(),
        value_type: error.value_type(),
    }
}
