//! # Taggers de citação
//!
//! Os três passos que descobrem fala citada em texto literário:
//!
//! 1. [`tag_quote_quote`] — casa aspas de abertura e fechamento dentro de
//!    cada parágrafo e emite regiões `quote.quote` (aspas incluídas).
//! 2. [`tag_quote_nonquote`] — deriva `quote.nonquote` como o complemento
//!    das citações e do texto fora de parágrafo, aparado de espaços.
//! 3. [`tag_quote_suspension`] — classifica os nonquotes que interrompem
//!    uma sentença (em vez de ficar entre duas sentenças completas) como
//!    `quote.suspension.short` / `quote.suspension.long`.
//!
//! ## Regras de aceitação de uma citação
//!
//! Um par de aspas casado só vira `quote.quote` se:
//! - contém 5 ou mais palavras, **ou**
//! - é seguido (até 5 caracteres, espaços opcionais) por `--`, **ou**
//! - os até 4 caracteres antes da aspa de fechamento terminam em `--` ou em
//!   um de `, ? . ! - ; _`.
//!
//! O mínimo de 5 palavras filtra fragmentos citados incidentais (títulos de
//! canções, exclamações soltas); os fallbacks de pontuação recuperam falas
//! curtas mas genuínas, claramente demarcadas pelo entorno.
//!
//! ## Estado por parágrafo
//!
//! O estado do casador zera no início de cada parágrafo: citações nunca são
//! casadas atravessando a fronteira. Uma citação deixada aberta quando o
//! parágrafo acaba é fechada à força na primeira fronteira de palavra além
//! dele, sem teste de aceitação — consumidores downstream dependem dessa
//! semântica de uma-região-por-parágrafo. Uma abertura sem par no fim real
//! do conteúdo não gera região nenhuma (não existe fronteira além do texto
//! para disparar o fechamento).

use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::error::TagError;
use crate::region::{
    append_without_whitespace, invert, Region, CHAPTER_PARAGRAPH, CHAPTER_SENTENCE, QUOTE_NONQUOTE,
    QUOTE_QUOTE, QUOTE_SUSPENSION_LONG, QUOTE_SUSPENSION_SHORT,
};
use crate::segment::{count_words, WordCursor};

/// Tabela de aspas: cada abertura mapeia para seu fechamento.
///
/// O padrão cobre os dois pares curvos ingleses e as duas aspas retas
/// (usadas bidirecionalmente).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteMarks {
    pairs: Vec<(String, String)>,
}

impl Default for QuoteMarks {
    fn default() -> Self {
        Self {
            pairs: vec![
                ("“".into(), "”".into()), // dupla inglesa
                ("‘".into(), "’".into()), // simples inglesa
                ("\"".into(), "\"".into()), // dupla universal
                ("'".into(), "'".into()), // simples universal
            ],
        }
    }
}

impl QuoteMarks {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Aspa de fechamento correspondente, se `seg` é uma abertura conhecida.
    pub fn closing(&self, seg: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(open, _)| open == seg)
            .map(|(_, close)| close.as_str())
    }
}

/// Até `n` caracteres imediatamente antes de `pos`.
fn chars_before(content: &str, pos: usize, n: usize) -> &str {
    let mut start = pos;
    for c in content[..pos].chars().rev().take(n) {
        start -= c.len_utf8();
    }
    &content[start..pos]
}

/// Até `n` caracteres imediatamente a partir de `pos`.
fn chars_after(content: &str, pos: usize, n: usize) -> &str {
    let mut end = pos;
    for c in content[pos..].chars().take(n) {
        end += c.len_utf8();
    }
    &content[pos..end]
}

/// Regra (b): espaços opcionais e então `--`, dentro dos 5 caracteres após
/// o fechamento.
fn dash_follows(content: &str, close_end: usize) -> bool {
    chars_after(content, close_end, 5).trim_start().starts_with("--")
}

/// Regra (c): os até 4 caracteres antes da aspa de fechamento terminam em
/// `--` (espaços finais permitidos) ou em uma das pontuações aceitas.
fn punct_precedes(content: &str, close_start: usize) -> bool {
    let window = chars_before(content, close_start, 4);
    window.trim_end().ends_with("--")
        || matches!(
            window.chars().next_back(),
            Some(',' | '?' | '.' | '!' | '-' | ';' | '_')
        )
}

/// Guarda de possessivo plural: um `s` seguido de apóstrofo (`days'`) não
/// abre citação.
fn plural_possessive(content: &str, mark_start: usize, mark: &str) -> bool {
    matches!(mark, "'" | "’")
        && content[..mark_start].chars().next_back() == Some('s')
}

/// Adiciona as regiões `quote.quote` ao livro.
///
/// Percorre as fronteiras de palavra de cada parágrafo mantendo no máximo
/// uma citação aberta por vez; ver a documentação do módulo para as regras
/// de aceitação e o fechamento forçado na fronteira de parágrafo.
///
/// No-op idempotente se `quote.quote` já está populado. Requer
/// `chapter.paragraph` válido.
pub fn tag_quote_quote(book: &mut Book, marks: &QuoteMarks) -> Result<(), TagError> {
    if book.has_regions(QUOTE_QUOTE) {
        return Ok(()); // nada a fazer
    }
    let paragraphs = book.require_valid(CHAPTER_PARAGRAPH)?.to_vec();
    let content = book.content.as_str();

    let mut quotes: Vec<Region> = Vec::new();
    for p in &paragraphs {
        let mut cursor = WordCursor::seek(content, p.start);
        let mut last_b = p.start;
        // (aspa de fechamento esperada, início da aspa de abertura)
        let mut open: Option<(&str, usize)> = None;
        let mut word_count = 0;

        while let Some((b, wordlike)) = cursor.next_boundary() {
            if b > p.end {
                // Parágrafo esgotado: fecha à força a citação pendente, sem
                // teste de aceitação, aparando espaços da fronteira.
                if let Some((_, open_start)) = open {
                    append_without_whitespace(&mut quotes, content, open_start, b);
                }
                break;
            }
            let seg = &content[last_b..b];

            if let Some((close_mark, open_start)) = open {
                if seg == close_mark {
                    // Candidata a fechamento: aplica as regras de aceitação
                    let accepted = word_count >= 5
                        || dash_follows(content, b)
                        || punct_precedes(content, last_b);
                    if accepted {
                        quotes.push(Region::new(open_start, b));
                    }
                    open = None;
                } else if wordlike {
                    word_count += 1;
                }
            } else if let Some(close_mark) = marks.closing(seg) {
                if !plural_possessive(content, last_b, seg) {
                    open = Some((close_mark, last_b));
                    word_count = 0;
                }
            }
            last_b = b;
        }
    }

    book.set_regions(QUOTE_QUOTE, quotes);
    Ok(())
}

/// Adiciona as regiões `quote.nonquote` ao livro.
///
/// Combina as citações com tudo que está fora de parágrafo (títulos,
/// lacunas entre capítulos) e inverte o conjunto: o que sobra é o texto
/// narrativo dentro dos parágrafos, aparado de espaços nas duas pontas.
///
/// No-op idempotente se `quote.nonquote` já está populado. Requer
/// `chapter.paragraph` válido e `quote.quote` presente.
pub fn tag_quote_nonquote(book: &mut Book) -> Result<(), TagError> {
    if book.has_regions(QUOTE_NONQUOTE) {
        return Ok(()); // nada a fazer
    }
    let paragraphs = book.require_valid(CHAPTER_PARAGRAPH)?;
    let quotes = book
        .regions(QUOTE_QUOTE)
        .ok_or_else(|| TagError::MissingAnnotation {
            label: QUOTE_QUOTE.to_string(),
        })?;

    let mut covered: Vec<Region> = quotes.to_vec();
    covered.extend(invert(paragraphs, book.content.len()));

    let content = book.content.as_str();
    let mut nonquotes = Vec::new();
    for gap in invert(&covered, content.len()) {
        append_without_whitespace(&mut nonquotes, content, gap.start, gap.end);
    }

    book.set_regions(QUOTE_NONQUOTE, nonquotes);
    Ok(())
}

/// Adiciona as regiões `quote.suspension.short` / `quote.suspension.long`.
///
/// Uma suspensão é um `quote.nonquote` que **não** é margeado por início ou
/// fim de sentença (com tolerância de 3 bytes para pontuação e aspas
/// adjacentes): narrativa que interrompe uma fala no meio da sentença, como
/// `he said,`. Menos de 5 palavras → curta; senão → longa.
///
/// O fluxo de fronteiras consultado é o início da primeira sentença seguido
/// do fim de todas elas (inícios subsequentes ficam logo após um fim, então
/// não acrescentam nada). O cursor sobre esse fluxo é único e monotônico
/// para a varredura inteira — os nonquotes chegam em ordem ascendente, e é
/// isso que torna o consumo incremental correto.
///
/// No-op idempotente se qualquer um dos dois rótulos já está populado.
/// Requer `chapter.sentence` válido e `quote.nonquote` presente.
pub fn tag_quote_suspension(book: &mut Book) -> Result<(), TagError> {
    if book.has_regions(QUOTE_SUSPENSION_SHORT) || book.has_regions(QUOTE_SUSPENSION_LONG) {
        return Ok(()); // nada a fazer
    }
    let sentences = book.require_valid(CHAPTER_SENTENCE)?;
    let nonquotes = book
        .regions(QUOTE_NONQUOTE)
        .ok_or_else(|| TagError::MissingAnnotation {
            label: QUOTE_NONQUOTE.to_string(),
        })?;

    let boundaries: Vec<usize> = sentences
        .first()
        .map(|r| r.start)
        .into_iter()
        .chain(sentences.iter().map(|r| r.end))
        .collect();
    let mut breaks = boundaries.into_iter();

    let content = book.content.as_str();
    let mut short = Vec::new();
    let mut long = Vec::new();
    // sentinela abaixo de qualquer offset válido
    let mut cur: i64 = -10;

    for r in nonquotes {
        let (r0, r1) = (r.start as i64, r.end as i64);
        let mut bordered = false;
        while cur < r1 + 3 {
            if cur > r0 - 3 {
                // fronteira de sentença dentro (ou adjacente) da região
                bordered = true;
                break;
            }
            match breaks.next() {
                Some(b) => cur = b as i64,
                // fluxo esgotado: nenhuma fronteira alcança esta região
                None => break,
            }
        }
        if !bordered {
            if count_words(content, r.start, r.end) < 5 {
                short.push(*r);
            } else {
                long.push(*r);
            }
        }
    }

    book.set_regions(QUOTE_SUSPENSION_SHORT, short);
    book.set_regions(QUOTE_SUSPENSION_LONG, long);
    Ok(())
}
