//! # Estado de anotação de um livro
//!
//! Um [`Book`] reúne o conteúdo imutável de um livro e o mapa de regiões
//! anotadas (rótulo → sequência ordenada de [`Region`]). Uma instância por
//! livro, com vida útil de uma passada de tagging; livros distintos não
//! compartilham estado mutável, o que permite ao driver externo anotar
//! vários livros em paralelo sem nenhum lock.
//!
//! O mapa só é mutado por substituição de sequências inteiras
//! ([`Book::set_regions`]): nenhum passo de tagging edita uma sequência já
//! publicada, então quem lê nunca observa uma sequência parcialmente
//! construída.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TagError;
use crate::region::Region;

/// Conteúdo e estado de anotação de um único livro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Nome do livro (identificador para logging e persistência).
    pub name: String,
    /// Texto completo do livro. Todos os offsets de região apontam aqui.
    pub content: String,
    /// Rótulo → sequência de regiões, ascendente por `start`.
    regions: BTreeMap<String, Vec<Region>>,
}

impl Book {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            regions: BTreeMap::new(),
        }
    }

    /// Sequência de regiões de um rótulo, se o rótulo já foi populado
    /// (uma sequência vazia conta como populada).
    pub fn regions(&self, label: &str) -> Option<&[Region]> {
        self.regions.get(label).map(|v| v.as_slice())
    }

    /// `true` se o rótulo tem pelo menos uma região — o teste de
    /// idempotência usado por todos os taggers ("nada a fazer").
    pub fn has_regions(&self, label: &str) -> bool {
        self.regions.get(label).map(|v| !v.is_empty()).unwrap_or(false)
    }

    /// Substitui a sequência inteira de um rótulo.
    pub fn set_regions(&mut self, label: &str, regions: Vec<Region>) {
        self.regions.insert(label.to_string(), regions);
    }

    /// Mapa completo rótulo → regiões (para serialização/persistência).
    pub fn all_regions(&self) -> &BTreeMap<String, Vec<Region>> {
        &self.regions
    }

    /// Busca um rótulo pré-requisito, validando a sequência.
    ///
    /// Falha com [`TagError::MissingAnnotation`] se o rótulo nunca foi
    /// populado, e com [`TagError::InvalidRegion`] se alguma região está
    /// invertida, fora do conteúdo, fora de fronteira de `char`, ou fora de
    /// ordem/sobreposta em relação à anterior. Offsets malformados nunca são
    /// corrigidos silenciosamente.
    pub fn require_valid(&self, label: &str) -> Result<&[Region], TagError> {
        let regions = self
            .regions(label)
            .ok_or_else(|| TagError::MissingAnnotation {
                label: label.to_string(),
            })?;

        let invalid = |r: &Region| TagError::InvalidRegion {
            label: label.to_string(),
            start: r.start,
            end: r.end,
        };

        let mut prev_end = 0usize;
        for r in regions {
            if r.start >= r.end
                || r.end > self.content.len()
                || !self.content.is_char_boundary(r.start)
                || !self.content.is_char_boundary(r.end)
                || r.start < prev_end
            {
                return Err(invalid(r));
            }
            prev_end = r.end;
        }
        Ok(regions)
    }
}
