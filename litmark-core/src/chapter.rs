//! # Taggers upstream de parágrafo e sentença
//!
//! Versões simples dos taggers que, em uma instalação real, rodam antes do
//! motor de citações e populam `chapter.paragraph` e `chapter.sentence`
//! (ver o contrato em [`crate::quote`]). Servem para a demo web e para os
//! testes; instalações com seus próprios taggers upstream simplesmente
//! populam os dois rótulos no [`Book`] e ignoram este módulo.
//!
//! - Parágrafo: bloco de texto separado por linha em branco, aparado.
//! - Sentença: fronteiras de sentença UAX-29 dentro de cada parágrafo.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::book::Book;
use crate::error::TagError;
use crate::region::{
    append_without_whitespace, invert, Region, CHAPTER_PARAGRAPH, CHAPTER_SENTENCE,
};

/// Adiciona as regiões `chapter.paragraph`: blocos separados por linha em
/// branco, aparados de espaços. No-op idempotente se já populado.
pub fn tag_paragraphs(book: &mut Book) {
    if book.has_regions(CHAPTER_PARAGRAPH) {
        return; // nada a fazer
    }
    let separator = Regex::new(r"\n\s*\n").unwrap();
    let content = book.content.as_str();

    let breaks: Vec<Region> = separator
        .find_iter(content)
        .map(|m| Region::new(m.start(), m.end()))
        .collect();

    let mut paragraphs = Vec::new();
    for gap in invert(&breaks, content.len()) {
        append_without_whitespace(&mut paragraphs, content, gap.start, gap.end);
    }
    book.set_regions(CHAPTER_PARAGRAPH, paragraphs);
}

/// Adiciona as regiões `chapter.sentence`: fronteiras de sentença UAX-29
/// dentro de cada parágrafo, aparadas. No-op idempotente se já populado;
/// requer `chapter.paragraph` válido.
pub fn tag_sentences(book: &mut Book) -> Result<(), TagError> {
    if book.has_regions(CHAPTER_SENTENCE) {
        return Ok(()); // nada a fazer
    }
    let paragraphs = book.require_valid(CHAPTER_PARAGRAPH)?.to_vec();
    let content = book.content.as_str();

    let mut sentences = Vec::new();
    for p in &paragraphs {
        for (start, sent) in content[p.start..p.end].split_sentence_bound_indices() {
            let abs = p.start + start;
            append_without_whitespace(&mut sentences, content, abs, abs + sent.len());
        }
    }
    book.set_regions(CHAPTER_SENTENCE, sentences);
    Ok(())
}
