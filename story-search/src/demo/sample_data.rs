//! Sample story corpus used by the demonstration.

use chrono::NaiveDate;
use story_search_shared::StoryDocument;

fn story(author: &str, document_type: &str, text: &str, (y, m, d): (i32, u32, u32)) -> StoryDocument {
    let date = NaiveDate::from_ymd_opt(y, m, d).expect("sample dates are valid");
    StoryDocument::new(author, document_type, text, date)
}

/// The ten sample stories indexed by the demonstration, spread over four
/// genres and six months of 2024.
pub fn sample_stories() -> Vec<StoryDocument> {
    vec![
        story(
            "Maria Gonzalez",
            "infantil",
            "Había una vez un pequeño dragón llamado Spark que vivía en un bosque encantado. \
             Todos los días exploraba el reino mágico buscando aventuras y nuevos amigos.",
            (2024, 4, 10),
        ),
        story(
            "Carlos Ruiz",
            "terror",
            "La casa de la colina abandonada era el lugar más terrorífico de la zona. \
             Nadie se atrevía a acercarse después del anochecer, pues extraños sonidos \
             resonaban desde su interior.",
            (2024, 7, 1),
        ),
        story(
            "Ana Martinez",
            "fantastico",
            "En el reino de las estrellas, donde la magia fluye como ríos de luz, \
             vivía una hechicera capaz de controlar el tiempo y el espacio.",
            (2024, 5, 15),
        ),
        story(
            "Pedro Lopez",
            "infantil",
            "Los animales del bosque organizaron una gran fiesta para celebrar la llegada \
             de la primavera. El oso, el conejo y el zorro bailaban bajo los árboles.",
            (2024, 3, 20),
        ),
        story(
            "Laura Sanchez",
            "terror",
            "El reloj de la torre marcaba las doce cuando las sombras comenzaron a moverse. \
             Un escalofrío recorrió mi espalda mientras escuchaba pasos acercándose.",
            (2024, 8, 12),
        ),
        story(
            "Miguel Torres",
            "fantastico",
            "El dragón guardián del reino había despertado después de mil años. \
             Su rugido resonó por toda la tierra, anunciando el retorno de la magia antigua.",
            (2024, 6, 30),
        ),
        story(
            "Sofia Ramirez",
            "politico",
            "El reino enfrentaba una crisis sin precedentes. Los consejeros debatían \
             sobre las nuevas leyes mientras el pueblo esperaba decisiones justas.",
            (2024, 9, 5),
        ),
        story(
            "Diego Morales",
            "politico",
            "La asamblea del reino se reunió para discutir el tratado de paz con las \
             tierras vecinas. Era un momento crucial para la diplomacia.",
            (2024, 10, 18),
        ),
        story(
            "Elena Vargas",
            "infantil",
            "La pequeña hada Lucía aprendió a volar por primera vez. Con sus alas \
             brillantes recorrió todo el jardín encantado lleno de flores mágicas.",
            (2024, 4, 25),
        ),
        story(
            "Roberto Diaz",
            "fantastico",
            "En las profundidades del océano mágico existía un reino de sirenas y criaturas \
             luminosas. Sus castillos de coral brillaban con luz propia.",
            (2024, 7, 22),
        ),
    ]
}
