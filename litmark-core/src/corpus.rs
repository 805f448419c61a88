//! # Trechos de demonstração
//!
//! Passagens curtas de literatura inglesa em domínio público, escolhidas por
//! exercitarem os casos interessantes do casador de citações: suspensões
//! curtas e longas, citações atravessando parágrafos, aspas curvas com
//! apóstrofos internos e possessivos plurais. Servidas pela demo web em
//! `/demo-texts` e reutilizadas nos testes do pipeline.

/// Retorna os pares (título, texto) de demonstração.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Great Expectations — suspensões",
            "“And on what evidence, Pip,” asked Mr. Jaggers, very coolly, as he\npaused with his handkerchief half way to his nose, “does Provis make this\nclaim?”\n\n“He does not make it,” said I, “and has never made it, and has no knowledge\nor belief that his daughter is in existence.”",
        ),
        (
            "Treasure Island — citações curtas adjacentes",
            "“Here's luck,” “A fair wind,” and “Billy Bones his fancy,” were very neatly\nand clearly executed on the forearm.\n\n“Because”--“because father and mamma have to go away,” I was going to say.",
        ),
        (
            "The Wind in the Willows — fala e narrativa",
            "The Mole had been working very hard all the morning, spring-cleaning.\n‘Hold up!’ said an elderly rabbit at the gap. ‘Sixpence for the\nprivilege of passing by the private road!’\n\n‘Thought I should find you here all right,’ said the Otter cheerfully.\n\n‘They were all in a great state of alarm along River Bank when I arrived\nthis morning.’",
        ),
        (
            "The Dove in the Eagle's Nest — aspas curvas",
            "“Thou find’st it out, child?  Ay, ’tis worth all the feather-beds and\npouncet-boxes in Ulm; is it not?  That accursed Italian fever never left\nme till I came up here.  Now then, ‘here is the view open.’  What think you of\nthe Eagle’s Nest?”\n\n‘And this is Schloss Adlerstein?’ she exclaimed.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_texts_are_nonempty() {
        let texts = demo_texts();
        assert!(!texts.is_empty());
        for (title, text) in texts {
            assert!(!title.is_empty());
            assert!(!text.trim().is_empty());
        }
    }
}
