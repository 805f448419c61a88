//! # Regiões de texto
//!
//! Uma região é um intervalo semiaberto `[start, end)` de offsets de **byte**
//! no conteúdo do livro, associado a um rótulo semântico (ex: `quote.quote`).
//! Todos os produtores e consumidores usam offsets de byte de forma
//! consistente, sempre em fronteiras de `char`.
//!
//! ## Rótulos de região
//!
//! | Rótulo                   | Significado                                  |
//! |--------------------------|----------------------------------------------|
//! | `chapter.paragraph`      | Um parágrafo dentro de um capítulo (upstream)|
//! | `chapter.sentence`       | Uma sentença (upstream)                      |
//! | `quote.quote`            | Fala citada, incluindo as aspas              |
//! | `quote.nonquote`         | Texto narrativo dentro do parágrafo          |
//! | `quote.suspension.short` | Suspensão narrativa com menos de 5 palavras  |
//! | `quote.suspension.long`  | Suspensão narrativa com 5 ou mais palavras   |
//!
//! Este módulo também contém a "álgebra de regiões": a inversão de um
//! conjunto de regiões sobre um domínio limitado e a inserção com
//! aparamento de espaços em branco. Os três taggers de `quote` são
//! construídos inteiramente sobre essas duas operações.

use serde::{Deserialize, Serialize};

/// Parágrafos dentro de capítulos, fornecidos por um tagger upstream.
pub const CHAPTER_PARAGRAPH: &str = "chapter.paragraph";
/// Sentenças, fornecidas por um tagger upstream.
pub const CHAPTER_SENTENCE: &str = "chapter.sentence";
/// Fala citada (inclui as aspas de abertura e fechamento).
pub const QUOTE_QUOTE: &str = "quote.quote";
/// Texto de parágrafo que não pertence a nenhuma citação.
pub const QUOTE_NONQUOTE: &str = "quote.nonquote";
/// Suspensão curta: interrupção narrativa com menos de 5 palavras.
pub const QUOTE_SUSPENSION_SHORT: &str = "quote.suspension.short";
/// Suspensão longa: interrupção narrativa com 5 ou mais palavras.
pub const QUOTE_SUSPENSION_LONG: &str = "quote.suspension.long";

/// Um intervalo semiaberto `[start, end)` de bytes no conteúdo do livro.
///
/// Após o aparamento de espaços, toda região armazenada satisfaz
/// `start < end` (regiões vazias são descartadas, nunca guardadas).
/// Sequências de regiões de um mesmo rótulo são mantidas ordenadas por
/// `start` e sem sobreposição mútua.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Offset de byte inicial (inclusivo).
    pub start: usize,
    /// Offset de byte final (exclusivo).
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Comprimento da região em bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Inverte um conjunto de regiões sobre o domínio `[0, len)`.
///
/// Retorna as lacunas maximais não cobertas por nenhuma região de entrada.
/// A entrada pode conter sobreposições; a ordenação interna por
/// `(start crescente, end decrescente)` garante que, entre regiões com o
/// mesmo início, a mais larga é varrida primeiro.
///
/// # Exemplo
/// `invert([10..20, 15..30], 40)` → `[0..10, 30..40]`
pub fn invert(regions: &[Region], len: usize) -> Vec<Region> {
    let mut sorted: Vec<Region> = regions.to_vec();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut gaps = Vec::new();
    let mut covered = 0usize;
    for r in sorted {
        if r.start > covered {
            gaps.push(Region::new(covered, r.start));
        }
        covered = covered.max(r.end);
    }
    if covered < len {
        gaps.push(Region::new(covered, len));
    }
    gaps
}

/// Apara espaços em branco Unicode de `[start, end)` contra `content` e,
/// se o intervalo resultante não for vazio, acrescenta-o a `seq`.
///
/// Intervalos que se reduzem a nada (só espaços) são silenciosamente
/// descartados. Toda região emitida pelo derivador de nonquote — e o
/// fechamento forçado de citações na fronteira de parágrafo — passa por
/// aqui.
pub fn append_without_whitespace(seq: &mut Vec<Region>, content: &str, start: usize, end: usize) {
    let slice = &content[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let trail = slice.len() - slice.trim_end().len();
    let trimmed = Region::new(start + lead, end - trail);
    if !trimmed.is_empty() {
        seq.push(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_basic() {
        let gaps = invert(&[Region::new(10, 20)], 30);
        assert_eq!(gaps, vec![Region::new(0, 10), Region::new(20, 30)]);
    }

    #[test]
    fn test_invert_empty_input_covers_domain() {
        assert_eq!(invert(&[], 7), vec![Region::new(0, 7)]);
    }

    #[test]
    fn test_invert_overlapping_regions_merge() {
        // 10..20 e 15..30 se sobrepõem: a lacuna entre elas não existe
        let gaps = invert(&[Region::new(10, 20), Region::new(15, 30)], 40);
        assert_eq!(gaps, vec![Region::new(0, 10), Region::new(30, 40)]);
    }

    #[test]
    fn test_invert_equal_start_wider_first() {
        // Mesmo início: a mais larga deve dominar a varredura
        let gaps = invert(&[Region::new(5, 8), Region::new(5, 20)], 25);
        assert_eq!(gaps, vec![Region::new(0, 5), Region::new(20, 25)]);
    }

    #[test]
    fn test_invert_region_at_domain_edges() {
        let gaps = invert(&[Region::new(0, 5), Region::new(25, 30)], 30);
        assert_eq!(gaps, vec![Region::new(5, 25)]);
    }

    #[test]
    fn test_append_trims_both_ends() {
        let content = "  he said,  ";
        let mut seq = Vec::new();
        append_without_whitespace(&mut seq, content, 0, content.len());
        assert_eq!(seq, vec![Region::new(2, 10)]);
        assert_eq!(&content[2..10], "he said,");
    }

    #[test]
    fn test_append_drops_whitespace_only() {
        let mut seq = Vec::new();
        append_without_whitespace(&mut seq, " \n\t ", 0, 4);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_append_trims_unicode_whitespace() {
        // U+00A0 (no-break space) também conta como espaço
        let content = "\u{a0}palavra\u{a0}";
        let mut seq = Vec::new();
        append_without_whitespace(&mut seq, content, 0, content.len());
        assert_eq!(seq.len(), 1);
        assert_eq!(&content[seq[0].start..seq[0].end], "palavra");
    }
}
