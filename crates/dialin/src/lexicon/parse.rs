use core::str::FromStr;
use std::collections::HashSet;

use super::{CompoundPair, LEXICON_VERSION, Lexicon, PhraseTemplate};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Words,
    Templates,
    Compounds,
    Adjectives,
    Nouns,
}

impl Section {
    fn from_header(name: &str) -> Option<Self> {
        match name {
            "words" => Some(Self::Words),
            "templates" => Some(Self::Templates),
            "compounds" => Some(Self::Compounds),
            "adjectives" => Some(Self::Adjectives),
            "nouns" => Some(Self::Nouns),
            _ => None,
        }
    }
}

impl FromStr for Lexicon {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut lexicon = Self::default();
        let mut version = None;
        let mut section = None;
        let mut seen_words = HashSet::new();
        let mut seen_templates = HashSet::new();

        for (index, raw) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                if version.is_none() {
                    return Err(Error::lexicon(line_no, "section before version header"));
                }
                section = Some(Section::from_header(header.trim()).ok_or_else(|| {
                    Error::lexicon(line_no, format!("unknown section [{}]", header.trim()))
                })?);
                continue;
            }

            let Some(current) = section else {
                version = Some(parse_version(line, line_no)?);
                continue;
            };

            match current {
                Section::Words => {
                    for token in line.split_whitespace() {
                        let word = normalize(token, line_no)?;
                        if seen_words.insert(word.clone()) {
                            lexicon.push_word(word);
                        }
                    }
                }
                Section::Templates => {
                    let parts = line
                        .split_whitespace()
                        .map(|token| normalize(token, line_no))
                        .collect::<Result<Vec<_>, _>>()?;
                    if !(2..=3).contains(&parts.len()) {
                        return Err(Error::lexicon(
                            line_no,
                            format!("template needs 2 or 3 parts, found {}", parts.len()),
                        ));
                    }
                    let template = PhraseTemplate::new(parts);
                    if seen_templates.insert(template.text()) {
                        lexicon.templates.push(template);
                    }
                }
                Section::Compounds => {
                    let (prefix, suffix) = line.split_once('+').ok_or_else(|| {
                        Error::lexicon(line_no, "compound must be written `prefix + suffix`")
                    })?;
                    lexicon.compounds.push(CompoundPair {
                        prefix: single_token(prefix, line_no)?,
                        suffix: single_token(suffix, line_no)?,
                    });
                }
                Section::Adjectives => {
                    for token in line.split_whitespace() {
                        lexicon.adjectives.push(normalize(token, line_no)?);
                    }
                }
                Section::Nouns => {
                    for token in line.split_whitespace() {
                        lexicon.nouns.push(normalize(token, line_no)?);
                    }
                }
            }
        }

        lexicon.version = version.ok_or_else(|| Error::lexicon(0, "missing version header"))?;
        Ok(lexicon)
    }
}

fn parse_version(line: &str, line_no: usize) -> Result<u32, Error> {
    let value = line
        .strip_prefix("version")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .map(str::trim)
        .ok_or_else(|| Error::lexicon(line_no, "expected `version = N` before any section"))?;
    let version: u32 = value
        .parse()
        .map_err(|_| Error::lexicon(line_no, format!("invalid version {value:?}")))?;
    if version != LEXICON_VERSION {
        return Err(Error::lexicon(
            line_no,
            format!("unsupported lexicon version {version}, expected {LEXICON_VERSION}"),
        ));
    }
    Ok(version)
}

fn normalize(token: &str, line_no: usize) -> Result<String, Error> {
    if token.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(token.to_ascii_lowercase())
    } else {
        Err(Error::lexicon(
            line_no,
            format!("{token:?} must contain only ASCII letters and digits"),
        ))
    }
}

fn single_token(value: &str, line_no: usize) -> Result<String, Error> {
    let mut tokens = value.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => normalize(token, line_no),
        _ => Err(Error::lexicon(
            line_no,
            format!("expected one word, found {:?}", value.trim()),
        )),
    }
}
