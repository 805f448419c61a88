//! # Pipeline de citações — Orquestrador com Eventos Observáveis
//!
//! O pipeline coordena os três taggers (`quote.quote` → `quote.nonquote` →
//! `quote.suspension.*`), cada um estritamente depois de suas dependências,
//! e pode emitir eventos a cada passo via um canal Rust (`mpsc`), permitindo
//! que o servidor WebSocket transmita o progresso em tempo real para o
//! cliente.
//!
//! Cada passo é um no-op quando seu(s) rótulo(s) de saída já estão
//! populados, então re-invocar o pipeline inteiro sobre um livro já anotado
//! é seguro e não duplica nada.
//!
//! O processamento de um livro é sequencial e síncrono; livros distintos
//! são independentes (nenhum estado mutável compartilhado), o que
//! [`QuotePipeline::tag_books`] explora para anotar uma coleção em paralelo
//! com `rayon`.

use std::collections::BTreeMap;
use std::sync::mpsc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::book::Book;
use crate::error::TagError;
use crate::quote::{tag_quote_quote, tag_quote_nonquote, tag_quote_suspension, QuoteMarks};
use crate::region::{
    Region, QUOTE_NONQUOTE, QUOTE_QUOTE, QUOTE_SUSPENSION_LONG, QUOTE_SUSPENSION_SHORT,
};

/// Eventos emitidos pelo pipeline durante o processamento.
///
/// Permitem que a UI visualize o andamento passo-a-passo. Cada variante
/// carrega os dados necessários para renderizar uma etapa.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: `quote.quote` anotado.
    QuotesTagged { regions: Vec<Region>, total: usize },
    /// **Passo 2**: `quote.nonquote` derivado.
    NonquotesTagged { regions: Vec<Region>, total: usize },
    /// **Passo 3**: nonquotes classificados como suspensão curta/longa.
    SuspensionsTagged {
        short: Vec<Region>,
        long: Vec<Region>,
    },
    /// **Conclusão**: estado final de anotação e tempo de processamento.
    Done {
        regions: BTreeMap<String, Vec<Region>>,
        processing_ms: u64,
    },
    /// **Falha**: pré-condição violada (ver [`TagError`]).
    Error { message: String },
}

/// O pipeline de anotação de citações.
///
/// Atua como o **controlador** do motor: roda casador, derivador e
/// classificador na ordem, sobre o estado de anotação de um livro cujos
/// rótulos upstream (`chapter.paragraph`, `chapter.sentence`) já foram
/// populados.
pub struct QuotePipeline {
    /// Tabela de aspas abertura → fechamento usada pelo casador.
    pub marks: QuoteMarks,
}

impl QuotePipeline {
    /// Cria o pipeline com a tabela de aspas padrão.
    pub fn new() -> Self {
        Self {
            marks: QuoteMarks::default(),
        }
    }

    /// Anota um livro de forma síncrona.
    ///
    /// Ideal para processamento em lote. Falha sem tagging parcial se os
    /// pré-requisitos upstream estão ausentes ou malformados.
    pub fn tag(&self, book: &mut Book) -> Result<(), TagError> {
        tag_quote_quote(book, &self.marks)?;
        debug!(
            book = %book.name,
            quotes = book.regions(QUOTE_QUOTE).map(|r| r.len()).unwrap_or(0),
            "quote.quote anotado"
        );

        tag_quote_nonquote(book)?;
        debug!(
            book = %book.name,
            nonquotes = book.regions(QUOTE_NONQUOTE).map(|r| r.len()).unwrap_or(0),
            "quote.nonquote anotado"
        );

        tag_quote_suspension(book)?;
        debug!(
            book = %book.name,
            short = book.regions(QUOTE_SUSPENSION_SHORT).map(|r| r.len()).unwrap_or(0),
            long = book.regions(QUOTE_SUSPENSION_LONG).map(|r| r.len()).unwrap_or(0),
            "quote.suspension anotado"
        );
        Ok(())
    }

    /// Anota um livro enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `QuotesTagged`
    /// 2. `NonquotesTagged`
    /// 3. `SuspensionsTagged`
    /// 4. `Done` — ou `Error` no lugar, se um pré-requisito faltou.
    pub fn tag_streaming(&self, book: &mut Book, tx: mpsc::Sender<PipelineEvent>) {
        let start = std::time::Instant::now();

        if let Err(e) = self.tag_streaming_steps(book, &tx) {
            let _ = tx.send(PipelineEvent::Error {
                message: e.to_string(),
            });
            return;
        }

        let _ = tx.send(PipelineEvent::Done {
            regions: book.all_regions().clone(),
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }

    fn tag_streaming_steps(
        &self,
        book: &mut Book,
        tx: &mpsc::Sender<PipelineEvent>,
    ) -> Result<(), TagError> {
        tag_quote_quote(book, &self.marks)?;
        let regions = book.regions(QUOTE_QUOTE).unwrap_or(&[]).to_vec();
        let _ = tx.send(PipelineEvent::QuotesTagged {
            total: regions.len(),
            regions,
        });

        tag_quote_nonquote(book)?;
        let regions = book.regions(QUOTE_NONQUOTE).unwrap_or(&[]).to_vec();
        let _ = tx.send(PipelineEvent::NonquotesTagged {
            total: regions.len(),
            regions,
        });

        tag_quote_suspension(book)?;
        let _ = tx.send(PipelineEvent::SuspensionsTagged {
            short: book.regions(QUOTE_SUSPENSION_SHORT).unwrap_or(&[]).to_vec(),
            long: book.regions(QUOTE_SUSPENSION_LONG).unwrap_or(&[]).to_vec(),
        });
        Ok(())
    }

    /// Anota uma coleção de livros em paralelo (um livro por task rayon).
    ///
    /// Cada livro é dono exclusivo do próprio estado, então não há lock
    /// nenhum. Retorna um resultado por livro, na mesma ordem.
    pub fn tag_books(&self, books: &mut [Book]) -> Vec<Result<(), TagError>> {
        books.par_iter_mut().map(|book| self.tag(book)).collect()
    }
}

impl Default for QuotePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter;
    use crate::corpus::demo_texts;
    use crate::region::CHAPTER_PARAGRAPH;

    fn demo_book(index: usize) -> Book {
        let (title, text) = demo_texts()[index];
        let mut book = Book::new(title, text);
        chapter::tag_paragraphs(&mut book);
        chapter::tag_sentences(&mut book).unwrap();
        book
    }

    #[test]
    fn test_pipeline_full_run() {
        let mut book = demo_book(0);
        QuotePipeline::new().tag(&mut book).unwrap();
        assert!(book.has_regions(QUOTE_QUOTE));
        assert!(book.has_regions(QUOTE_NONQUOTE));
    }

    #[test]
    fn test_pipeline_missing_prerequisites_fails_without_partial_tagging() {
        let mut book = Book::new("t", "“No paragraphs were tagged,” he said.");
        let err = QuotePipeline::new().tag(&mut book).unwrap_err();
        assert_eq!(
            err,
            TagError::MissingAnnotation {
                label: CHAPTER_PARAGRAPH.to_string()
            }
        );
        assert!(book.regions(QUOTE_QUOTE).is_none());
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let pipeline = QuotePipeline::new();
        let mut book = demo_book(2);
        pipeline.tag(&mut book).unwrap();
        let first = book.all_regions().clone();
        pipeline.tag(&mut book).unwrap();
        assert_eq!(&first, book.all_regions());
    }

    #[test]
    fn test_all_labels_ascending_and_disjoint() {
        for index in 0..demo_texts().len() {
            let mut book = demo_book(index);
            QuotePipeline::new().tag(&mut book).unwrap();
            for (label, regions) in book.all_regions() {
                for r in regions {
                    assert!(r.start < r.end, "{label}: região vazia");
                }
                for pair in regions.windows(2) {
                    assert!(
                        pair[0].end <= pair[1].start,
                        "{label}: sobreposição ou desordem"
                    );
                }
            }
        }
    }

    #[test]
    fn test_quotes_and_nonquotes_tile_each_paragraph() {
        // quote.quote ∪ quote.nonquote, restrito a um parágrafo, cobre o
        // parágrafo exatamente, módulo espaços em branco
        for index in 0..demo_texts().len() {
            let mut book = demo_book(index);
            QuotePipeline::new().tag(&mut book).unwrap();

            let is_blank = |start: usize, end: usize| {
                book.content[start..end].chars().all(char::is_whitespace)
            };

            for p in book.regions(CHAPTER_PARAGRAPH).unwrap() {
                let mut pieces: Vec<Region> = book
                    .regions(QUOTE_QUOTE)
                    .unwrap()
                    .iter()
                    .chain(book.regions(QUOTE_NONQUOTE).unwrap())
                    .filter(|r| r.start >= p.start && r.end <= p.end)
                    .copied()
                    .collect();
                pieces.sort_by_key(|r| r.start);

                let mut covered = p.start;
                for piece in pieces {
                    assert!(is_blank(covered, piece.start));
                    covered = piece.end;
                }
                assert!(is_blank(covered, p.end));
            }
        }
    }

    #[test]
    fn test_suspensions_are_nonquotes() {
        let mut book = demo_book(0);
        QuotePipeline::new().tag(&mut book).unwrap();
        let nonquotes = book.regions(QUOTE_NONQUOTE).unwrap();
        let suspensions: Vec<Region> = book
            .regions(QUOTE_SUSPENSION_SHORT)
            .unwrap()
            .iter()
            .chain(book.regions(QUOTE_SUSPENSION_LONG).unwrap())
            .copied()
            .collect();
        for s in suspensions {
            assert!(nonquotes.contains(&s));
        }
    }

    #[test]
    fn test_tag_books_in_parallel() {
        let pipeline = QuotePipeline::new();
        let mut books: Vec<Book> = (0..demo_texts().len()).map(demo_book).collect();
        let results = pipeline.tag_books(&mut books);
        assert_eq!(results.len(), books.len());
        for (book, result) in books.iter().zip(&results) {
            assert!(result.is_ok());
            assert!(book.has_regions(QUOTE_QUOTE));
        }
    }

    #[test]
    fn test_streaming_event_order() {
        let pipeline = QuotePipeline::new();
        let mut book = demo_book(1);
        let (tx, rx) = mpsc::channel();
        pipeline.tag_streaming(&mut book, tx);

        let events: Vec<PipelineEvent> = rx.try_iter().collect();
        assert!(
            matches!(&events[0], PipelineEvent::QuotesTagged { .. }),
            "primeiro evento deve ser QuotesTagged"
        );
        assert!(
            matches!(events.last().unwrap(), PipelineEvent::Done { .. }),
            "último evento deve ser Done"
        );
    }

    #[test]
    fn test_streaming_reports_errors_as_event() {
        let pipeline = QuotePipeline::new();
        let mut book = Book::new("t", "“untagged book,” he said.");
        let (tx, rx) = mpsc::channel();
        pipeline.tag_streaming(&mut book, tx);

        let events: Vec<PipelineEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], PipelineEvent::Error { .. }));
    }

    #[test]
    fn test_event_json_shape() {
        let event = PipelineEvent::QuotesTagged {
            regions: vec![Region::new(0, 7)],
            total: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "QuotesTagged");
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["regions"][0]["start"], 0);
    }
}
