use crate::{
    domain::IdeaRepository,
    errors::RepoError,
    models::{NewIdea, ValidIdea},
};

const SAMPLES: &[(&str, &str, &[&str])] = &[
    (
        "Mapa de cafeterías indie",
        "Un mapa interactivo de cafeterías independientes con reseñas de la comunidad.",
        &["mapas", "comunidad", "coffee"],
    ),
    (
        "Generador de paletas AI",
        "Herramienta que sugiere paletas de colores a partir de una imagen.",
        &["ia", "ux", "colores"],
    ),
    (
        "Radio de foco",
        "Una playlist infinita que minimiza distracciones según tu horario.",
        &["audio", "productividad"],
    ),
];

/// Sample ideas that pass validation. A sample that fails is logged and skipped.
pub fn sample_ideas() -> Vec<ValidIdea> {
    SAMPLES
        .iter()
        .filter_map(|(title, description, tags)| {
            let candidate = NewIdea {
                title: title.to_string(),
                description: description.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            };
            match candidate.validate() {
                Ok(valid) => Some(valid),
                Err(e) => {
                    tracing::error!(%title, error = %e, "Sample idea failed validation, skipping it");
                    None
                }
            }
        })
        .collect()
}

/// Inserts the sample ideas only when the store is empty. All samples go in
/// together or not at all. Returns how many were inserted (0 when data already exists).
pub async fn seed_if_empty(repo: &dyn IdeaRepository) -> Result<usize, RepoError> {
    let inserted = repo.insert_all_if_empty(&sample_ideas()).await?;
    if inserted == 0 {
        tracing::info!("Seed skipped, ideas already present");
    } else {
        tracing::info!(count = inserted, "Seeded sample ideas");
    }
    Ok(inserted)
}
