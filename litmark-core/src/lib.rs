//! # litmark-core — Anotação de regiões de citação em textos literários
//!
//! Este crate implementa o motor que descobre fala citada (*quotes*),
//! narrativa complementar (*nonquotes*) e suspensões narrativas em livros,
//! anotando-os como regiões sobrepostas de offsets de byte — a base para
//! consultas de linguística de corpus do tipo "encontre toda fala citada".
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui por um pipeline linear sobre o estado de anotação de um
//! livro ([`Book`]):
//!
//! 1. **Entrada**: conteúdo do livro mais os rótulos upstream
//!    `chapter.paragraph` e `chapter.sentence` (fornecidos por taggers
//!    externos, ou pelos substitutos simples de [`chapter`]).
//! 2. **Casamento de citações** ([`quote::tag_quote_quote`]): máquina de
//!    estados por parágrafo que casa aspas de abertura/fechamento sobre as
//!    fronteiras de palavra Unicode ([`segment`]).
//! 3. **Derivação de nonquotes** ([`quote::tag_quote_nonquote`]):
//!    complemento das citações e do texto fora de parágrafo, via a álgebra
//!    de regiões ([`region`]).
//! 4. **Classificação de suspensões** ([`quote::tag_quote_suspension`]):
//!    nonquotes que interrompem uma sentença viram
//!    `quote.suspension.short` / `quote.suspension.long`.
//! 5. **Saída**: sequências de [`Region`] por rótulo, ordenadas e sem
//!    sobreposição, prontas para a camada de persistência.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use litmark_core::{chapter, Book, QuotePipeline};
//!
//! let mut book = Book::new(
//!     "exemplo",
//!     "“He does not make it,” said I, “and has never made it, and has no knowledge\nor belief that his daughter is in existence.”",
//! );
//!
//! // 1. Taggers upstream (parágrafos e sentenças)
//! chapter::tag_paragraphs(&mut book);
//! chapter::tag_sentences(&mut book)?;
//!
//! // 2. Pipeline de citações
//! let pipeline = QuotePipeline::new();
//! pipeline.tag(&mut book)?;
//!
//! // 3. As regiões anotadas apontam de volta para o conteúdo
//! for region in book.regions("quote.quote").unwrap() {
//!     println!("citação: {}", &book.content[region.start..region.end]);
//! }
//! # Ok::<(), litmark_core::TagError>(())
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: orquestrador que conecta os três taggers, com eventos
//!   observáveis para a UI e anotação paralela de coleções.
//! - [`quote`]: o casador de citações e seus dois derivados.
//! - [`region`]: a álgebra de regiões (inversão, inserção aparada).
//! - [`segment`]: adaptador de fronteiras de palavra UAX-29.
//! - [`chapter`]: substitutos simples dos taggers upstream.

pub mod book;
pub mod chapter;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod quote;
pub mod region;
pub mod segment;

pub use book::Book;
pub use error::TagError;
pub use pipeline::{PipelineEvent, QuotePipeline};
pub use quote::QuoteMarks;
pub use region::Region;
