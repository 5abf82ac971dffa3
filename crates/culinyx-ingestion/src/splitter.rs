//! Fragment splitting.
//!
//! Recursive splitting in the LangChain style: try the coarsest separator
//! first (paragraph break), fall back to finer ones (line break, sentence
//! end, word break) only for pieces that still exceed the limit, with a hard
//! character cut as last resort. Pieces are then greedily packed into
//! windows of at most `max_chars` characters; each window after the first is
//! seeded with roughly `overlap` trailing characters of the previous one,
//! aligned back to a piece boundary, so a split sentence keeps its context.
//!
//! Lengths are counted in characters, not bytes. Output is deterministic.

use crate::error::{IngestError, Result};
use crate::models::{Fragment, Recipe};

/// Separator priority, coarsest first.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

#[derive(Debug, Clone, PartialEq)]
pub struct SplitterConfig {
    /// Maximum fragment length in characters.
    pub max_chars: usize,
    /// Characters of trailing/leading context shared by consecutive
    /// fragments. Independent of `max_chars`; never derived from it.
    pub overlap: usize,
}

impl SplitterConfig {
    pub fn new(max_chars: usize, overlap: usize) -> Result<Self> {
        if max_chars == 0 {
            return Err(IngestError::InvalidConfig(
                "max_chars must be at least 1".to_string(),
            ));
        }
        if overlap >= max_chars {
            return Err(IngestError::InvalidConfig(format!(
                "overlap {overlap} must be smaller than max_chars {max_chars}"
            )));
        }
        Ok(Self { max_chars, overlap })
    }
}

/// Split one recipe description into overlapping bounded fragments.
///
/// A description no longer than `max_chars` yields exactly one fragment
/// equal to the description. An empty description yields none.
pub fn split_recipe(recipe: &Recipe, cfg: &SplitterConfig) -> Vec<Fragment> {
    let description = recipe.description.as_str();
    if description.trim().is_empty() {
        return Vec::new();
    }
    if char_len(description) <= cfg.max_chars {
        return vec![Fragment {
            content: description.to_string(),
            recipe_title: recipe.title.clone(),
        }];
    }

    let mut pieces = Vec::new();
    decompose(description, cfg.max_chars, &SEPARATORS, &mut pieces);

    pack(&pieces, cfg)
        .into_iter()
        .filter(|content| !content.trim().is_empty())
        .map(|content| Fragment {
            content,
            recipe_title: recipe.title.clone(),
        })
        .collect()
}

/// Break `text` into ordered pieces of at most `max` characters.
///
/// Separators stay attached to the end of the piece they close
/// (`split_inclusive`), so concatenating the pieces reproduces `text`
/// byte for byte.
fn decompose<'a>(text: &'a str, max: usize, separators: &[&str], out: &mut Vec<&'a str>) {
    if text.is_empty() {
        return;
    }
    if char_len(text) <= max {
        out.push(text);
        return;
    }

    match separators.split_first() {
        Some((sep, finer)) => {
            for piece in text.split_inclusive(sep) {
                if char_len(piece) <= max {
                    out.push(piece);
                } else {
                    decompose(piece, max, finer, out);
                }
            }
        }
        None => {
            // No separator left: hard cut on character boundaries.
            let mut start = 0;
            let mut chars_in_piece = 0;
            for (idx, _) in text.char_indices() {
                if chars_in_piece == max {
                    out.push(&text[start..idx]);
                    start = idx;
                    chars_in_piece = 0;
                }
                chars_in_piece += 1;
            }
            if start < text.len() {
                out.push(&text[start..]);
            }
        }
    }
}

/// Greedily pack pieces into windows of at most `max_chars` characters.
///
/// When a window closes, the next one starts with the trailing pieces of
/// the closed window totalling at most `overlap` characters (trimmed from
/// the front if they would crowd out the incoming piece).
fn pack(pieces: &[&str], cfg: &SplitterConfig) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut window: Vec<&str> = Vec::new();
    let mut window_len = 0usize;

    for &piece in pieces {
        let piece_len = char_len(piece);

        if window_len + piece_len > cfg.max_chars && !window.is_empty() {
            fragments.push(window.concat());

            let mut seed: Vec<&str> = Vec::new();
            let mut seed_len = 0usize;
            for &p in window.iter().rev() {
                let l = char_len(p);
                if seed_len + l > cfg.overlap {
                    break;
                }
                seed.push(p);
                seed_len += l;
            }
            seed.reverse();
            while !seed.is_empty() && seed_len + piece_len > cfg.max_chars {
                seed_len -= char_len(seed.remove(0));
            }

            window = seed;
            window_len = seed_len;
        }

        window.push(piece);
        window_len += piece_len;
    }

    if !window.is_empty() {
        fragments.push(window.concat());
    }

    fragments
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str, description: &str) -> Recipe {
        Recipe {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// Strip each fragment's leading overlap (the longest prefix that is a
    /// suffix of what came before) and concatenate.
    fn reconstruct(fragments: &[Fragment]) -> String {
        let mut out = String::new();
        for f in fragments {
            let mut skip = 0;
            let boundaries = f
                .content
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(f.content.len()));
            for b in boundaries {
                if b <= out.len() && out.ends_with(&f.content[..b]) {
                    skip = skip.max(b);
                }
            }
            out.push_str(&f.content[skip..]);
        }
        out
    }

    #[test]
    fn short_description_is_one_fragment() {
        let r = recipe("Toast", "Butter the bread. Toast it.");
        let cfg = SplitterConfig::new(1000, 100).unwrap();
        let fragments = split_recipe(&r, &cfg);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].content, r.description);
        assert_eq!(fragments[0].recipe_title, "Toast");
    }

    #[test]
    fn empty_description_yields_no_fragments() {
        let cfg = SplitterConfig::new(100, 10).unwrap();
        assert!(split_recipe(&recipe("Nothing", ""), &cfg).is_empty());
    }

    #[test]
    fn no_fragment_exceeds_max_or_is_empty() {
        let description = "Dice the onions finely. Brown the beef in batches. \
                           Add the stock and wine.\n\nSimmer gently for two hours, \
                           skimming as needed. Season to taste and serve hot."
            .repeat(8);
        let cfg = SplitterConfig::new(120, 20).unwrap();
        let fragments = split_recipe(&recipe("Stew", &description), &cfg);

        assert!(fragments.len() > 1);
        for f in &fragments {
            assert!(!f.content.trim().is_empty());
            assert!(f.content.chars().count() <= 120);
            assert_eq!(f.recipe_title, "Stew");
        }
    }

    #[test]
    fn zero_overlap_concatenation_is_lossless() {
        let description = "One sentence here. Another sentence there. \
                           And a third one follows. Then a fourth for measure."
            .repeat(5);
        let cfg = SplitterConfig::new(80, 0).unwrap();
        let fragments = split_recipe(&recipe("R", &description), &cfg);

        let joined: String = fragments.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(joined, description);
    }

    #[test]
    fn overlap_stripped_concatenation_reconstructs_description() {
        let description = (1..=40)
            .map(|i| format!("Step number {i} of the recipe goes here."))
            .collect::<Vec<_>>()
            .join(" ");
        let cfg = SplitterConfig::new(150, 30).unwrap();
        let fragments = split_recipe(&recipe("R", &description), &cfg);

        assert!(fragments.len() > 1);
        assert_eq!(reconstruct(&fragments), description);
    }

    #[test]
    fn consecutive_fragments_share_overlap_context() {
        let description = (1..=40)
            .map(|i| format!("Step number {i} of the recipe goes here."))
            .collect::<Vec<_>>()
            .join(" ");
        let cfg = SplitterConfig::new(150, 40).unwrap();
        let fragments = split_recipe(&recipe("R", &description), &cfg);

        for pair in fragments.windows(2) {
            // The next fragment starts with some non-empty suffix of the
            // previous one.
            let prev = &pair[0].content;
            let next = &pair[1].content;
            let shares = (1..=next.len().min(prev.len()))
                .filter(|&b| next.is_char_boundary(b))
                .any(|b| prev.ends_with(&next[..b]));
            assert!(shares, "no shared context between consecutive fragments");
        }
    }

    #[test]
    fn prefers_paragraph_breaks_over_finer_separators() {
        let description = format!("{}\n\n{}", "a".repeat(60), "b".repeat(60));
        let cfg = SplitterConfig::new(80, 0).unwrap();
        let fragments = split_recipe(&recipe("R", &description), &cfg);

        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].content.ends_with("\n\n"));
        assert!(fragments[1].content.chars().all(|c| c == 'b'));
    }

    #[test]
    fn unbroken_text_falls_back_to_hard_cut() {
        let description = "x".repeat(250);
        let cfg = SplitterConfig::new(100, 0).unwrap();
        let fragments = split_recipe(&recipe("R", &description), &cfg);

        assert_eq!(fragments.len(), 3);
        assert!(fragments.iter().all(|f| f.content.chars().count() <= 100));
        let joined: String = fragments.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(joined, description);
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let description = "é".repeat(150);
        let cfg = SplitterConfig::new(100, 0).unwrap();
        let fragments = split_recipe(&recipe("R", &description), &cfg);

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].content.chars().count(), 100);
        assert_eq!(fragments[1].content.chars().count(), 50);
    }

    #[test]
    fn output_is_deterministic() {
        let description = (1..=30)
            .map(|i| format!("Sentence {i} about braising."))
            .collect::<Vec<_>>()
            .join(" ");
        let cfg = SplitterConfig::new(90, 15).unwrap();
        let r = recipe("R", &description);

        assert_eq!(split_recipe(&r, &cfg), split_recipe(&r, &cfg));
    }

    #[test]
    fn overlap_must_be_smaller_than_max_chars() {
        assert!(SplitterConfig::new(100, 100).is_err());
        assert!(SplitterConfig::new(100, 101).is_err());
        assert!(SplitterConfig::new(0, 0).is_err());
        assert!(SplitterConfig::new(100, 99).is_ok());
    }
}
