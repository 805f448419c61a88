//! # Erros de anotação
//!
//! Falhas de pré-condição na entrada do motor de tagging. Anotações
//! upstream ausentes ou malformadas são erros fatais: o motor não tenta um
//! tagging parcial nem corrige offsets silenciosamente.
//! Candidatos a citação rejeitados, regiões aparadas até o vazio e conjuntos
//! de suspensão vazios **não** são erros — são resultados normais.

use thiserror::Error;

/// Erro fatal ao executar um passo de tagging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    /// Um rótulo pré-requisito (ex: `chapter.paragraph`) não foi populado
    /// pelos taggers upstream antes da execução deste passo.
    #[error("anotação pré-requisito ausente: {label}")]
    MissingAnnotation { label: String },

    /// Uma região upstream tem offsets malformados: invertidos, fora do
    /// conteúdo, fora de fronteira de `char`, ou fora de ordem /
    /// sobrepostos dentro da sequência do rótulo.
    #[error("região malformada em {label}: [{start}, {end})")]
    InvalidRegion {
        label: String,
        start: usize,
        end: usize,
    },
}
