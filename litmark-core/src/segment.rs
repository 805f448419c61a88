//! # Segmentação de palavras (UAX-29)
//!
//! Adaptador sobre as fronteiras de palavra Unicode do crate
//! `unicode-segmentation`. O casador de citações não olha para "tokens":
//! ele caminha por um fluxo de **fronteiras** de segmentação, comparando o
//! segmento entre a fronteira anterior e a atual com as aspas conhecidas.
//!
//! Duas propriedades das regras UAX-29 são essenciais aqui:
//! 1. Apóstrofos internos não quebram palavras ("find’st", "Here's" são um
//!    segmento só), então um `’` no meio de uma palavra nunca é confundido
//!    com uma aspa de fechamento.
//! 2. Pontuação e espaços formam segmentos próprios, não "palavras" — o
//!    flag word-like distingue os dois.
//!
//! O cursor é estritamente forward-only (re-posicionável apenas via um novo
//! [`WordCursor::seek`]), o que mantém explícitos os pontos de suspensão da
//! máquina de estados que o consome.

use unicode_segmentation::{UWordBoundIndices, UnicodeSegmentation};

/// Cursor forward-only sobre as fronteiras de palavra de `content` a partir
/// de um offset conhecido.
pub struct WordCursor<'a> {
    base: usize,
    bounds: UWordBoundIndices<'a>,
}

impl<'a> WordCursor<'a> {
    /// Posiciona um cursor novo em `offset`, que deve estar em fronteira de
    /// `char` e é tratado como início de segmentação. Na prática os seeks
    /// acontecem em inícios de parágrafo e de região aparada, que são
    /// inícios de segmento de qualquer forma.
    pub fn seek(content: &'a str, offset: usize) -> Self {
        Self {
            base: offset,
            bounds: content[offset..].split_word_bound_indices(),
        }
    }

    /// Avança para a próxima fronteira.
    ///
    /// Retorna `(offset_da_fronteira, word_like)`: o offset absoluto do fim
    /// do próximo segmento e se esse segmento contém conteúdo alfanumérico
    /// (palavra/número) em vez de só pontuação ou espaço. `None` quando o
    /// conteúdo acaba.
    pub fn next_boundary(&mut self) -> Option<(usize, bool)> {
        self.bounds
            .next()
            .map(|(start, seg)| (self.base + start + seg.len(), is_wordlike(seg)))
    }
}

/// Um segmento é word-like se contém pelo menos uma letra ou dígito.
fn is_wordlike(seg: &str) -> bool {
    seg.chars().any(|c| c.is_alphanumeric())
}

/// Conta os segmentos word-like cuja fronteira final cai em `(start, end]`.
///
/// Monotônico no limite superior: `count_words(c, a, b) <=
/// count_words(c, a, d)` para todo `b <= d`.
pub fn count_words(content: &str, start: usize, end: usize) -> usize {
    let mut cursor = WordCursor::seek(content, start);
    let mut count = 0;
    while let Some((b, wordlike)) = cursor.next_boundary() {
        if b > end {
            break;
        }
        if wordlike {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_ascending_and_finite() {
        let text = "Hold up! said the rabbit.";
        let mut cursor = WordCursor::seek(text, 0);
        let mut last = 0;
        while let Some((b, _)) = cursor.next_boundary() {
            assert!(b > last);
            last = b;
        }
        assert_eq!(last, text.len());
    }

    #[test]
    fn test_punctuation_is_not_wordlike() {
        let text = "word, \"next\"";
        let mut cursor = WordCursor::seek(text, 0);
        let mut words = 0;
        while let Some((_, wordlike)) = cursor.next_boundary() {
            if wordlike {
                words += 1;
            }
        }
        assert_eq!(words, 2);
    }

    #[test]
    fn test_internal_apostrophe_stays_in_word() {
        // "find’st" não pode quebrar no apóstrofo
        let text = "Thou find’st it";
        assert_eq!(count_words(text, 0, text.len()), 3);
    }

    #[test]
    fn test_quote_marks_segment_alone() {
        let text = "“Ok”";
        let mut cursor = WordCursor::seek(text, 0);
        let (b, wordlike) = cursor.next_boundary().unwrap();
        assert_eq!(b, "“".len());
        assert!(!wordlike);
    }

    #[test]
    fn test_count_words_basic() {
        let text = "Five words is a quote";
        assert_eq!(count_words(text, 0, text.len()), 5);
    }

    #[test]
    fn test_count_words_monotonic_in_upper_bound() {
        let text = "one two three four five six";
        let mut prev = 0;
        for end in 0..=text.len() {
            if !text.is_char_boundary(end) {
                continue;
            }
            let n = count_words(text, 0, end);
            assert!(n >= prev);
            prev = n;
        }
    }

    #[test]
    fn test_count_words_sub_range() {
        let text = "he said, very coolly";
        // a vírgula e os espaços não contam
        assert_eq!(count_words(text, 0, 8), 2);
    }
}
