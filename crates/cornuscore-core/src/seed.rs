//! Demo profiles used when no saved data exists

use chrono::{DateTime, TimeZone, Utc};

use crate::profile::{PersonProfile, Review, ReviewCategory};

fn at_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn review(
    id: &str,
    category: ReviewCategory,
    text: &str,
    score: i64,
    date: DateTime<Utc>,
    author: &str,
    confirmations: u32,
    person: &str,
) -> Review {
    Review {
        id: id.to_string(),
        category,
        text: text.to_string(),
        score,
        date,
        pseudo_author: author.to_string(),
        confirmations,
        evidence_url: None,
        person_reviewed: Some(person.to_string()),
    }
}

fn identifiers(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// The six initial demo profiles with their reviews.
///
/// Seed review scores are historical and do not always equal their
/// category's score; totals are derived from the reviews as stored.
pub fn initial_profiles() -> Vec<PersonProfile> {
    use ReviewCategory::*;

    let mut infidelity = review(
        "rev1",
        Infidelity,
        "Me fue infiel con mi mejor amiga. Cero confianza.",
        -3,
        at_noon(2023, 10, 15),
        "user123",
        12,
        "Ana Perez",
    );
    infidelity.evidence_url = Some("https://i.imgur.com/v6tcf17.png".to_string());

    vec![
        PersonProfile::with_reviews(
            "prof1",
            identifiers(&["ana perez", "anita.perez95", "1122334455"]),
            "Argentina",
            vec![
                infidelity,
                review(
                    "rev2",
                    Toxic,
                    "Muy controladora y celosa. Revisaba mi celular a escondidas.",
                    -2,
                    at_noon(2023, 8, 20),
                    "user456",
                    7,
                    "Ana Perez",
                ),
                review(
                    "rev3",
                    Betrayal,
                    "Contó secretos míos a todo nuestro grupo de amigos. Una traidora.",
                    -3,
                    at_noon(2024, 1, 5),
                    "user789",
                    5,
                    "Ana Perez",
                ),
            ],
        ),
        PersonProfile::with_reviews(
            "prof2",
            identifiers(&["carlos gomez", "charlyg", "5544332211"]),
            "México",
            vec![
                review(
                    "rev4",
                    Positive,
                    "El amigo más leal que he tenido. Siempre está ahí para apoyarte.",
                    2,
                    at_noon(2024, 2, 10),
                    "user321",
                    25,
                    "Carlos Gomez",
                ),
                review(
                    "rev5",
                    Positive,
                    "Súper detallista y atento. La mejor pareja que he tenido.",
                    2,
                    at_noon(2023, 11, 30),
                    "user654",
                    18,
                    "Carlos Gomez",
                ),
            ],
        ),
        PersonProfile::with_reviews(
            "prof3",
            identifiers(&["ricardo diaz", "richid"]),
            "Colombia",
            vec![
                review(
                    "rev6",
                    Theft,
                    "Le presté dinero y nunca me lo devolvió, se desapareció.",
                    -4,
                    at_noon(2023, 9, 1),
                    "user987",
                    3,
                    "Ricardo Diaz",
                ),
                review(
                    "rev7",
                    Infidelity,
                    "Me enteré que tenía una doble vida con otra familia.",
                    -3,
                    at_noon(2022, 5, 12),
                    "user111",
                    9,
                    "Ricardo Diaz",
                ),
            ],
        ),
        PersonProfile::with_reviews(
            "prof4",
            identifiers(&["sofia luna", "sofilu"]),
            "España",
            vec![review(
                "rev8",
                Positive,
                "Una persona increíble, honesta y trabajadora.",
                2,
                at_noon(2024, 3, 1),
                "user222",
                15,
                "Sofia Luna",
            )],
        ),
        PersonProfile::with_reviews(
            "prof5",
            identifiers(&["pedro navaja"]),
            "Perú",
            vec![review(
                "rev9",
                Toxic,
                "Manipulador, te hace sentir culpable por todo.",
                -2,
                at_noon(2023, 6, 18),
                "user333",
                4,
                "Pedro Navaja",
            )],
        ),
        PersonProfile::with_reviews(
            "prof6",
            identifiers(&["Cintia Fernandez", "sintiafer"]),
            "Chile",
            vec![
                review(
                    "rev10",
                    Positive,
                    "Muy amable y colaboradora en el trabajo.",
                    2,
                    at_noon(2024, 4, 1),
                    "user444",
                    8,
                    "Cintia Fernandez",
                ),
                review(
                    "rev11",
                    Toxic,
                    "A veces es un poco chismosa.",
                    -1,
                    at_noon(2024, 3, 15),
                    "user555",
                    2,
                    "Cintia Fernandez",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ReputationLevel;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seed_totals() {
        let totals: Vec<(String, i64, ReputationLevel)> = initial_profiles()
            .into_iter()
            .map(|p| (p.id, p.total_score, p.reputation))
            .collect();

        assert_eq!(
            totals,
            vec![
                ("prof1".to_string(), -8, ReputationLevel::Risk),
                ("prof2".to_string(), 4, ReputationLevel::Positive),
                ("prof3".to_string(), -7, ReputationLevel::Risk),
                ("prof4".to_string(), 2, ReputationLevel::Positive),
                ("prof5".to_string(), -2, ReputationLevel::Warning),
                ("prof6".to_string(), 1, ReputationLevel::Positive),
            ]
        );
    }

    #[test]
    fn test_seed_dates() {
        let profiles = initial_profiles();
        assert_eq!(
            profiles[0].reviews[0].date.to_rfc3339(),
            "2023-10-15T12:00:00+00:00"
        );
        assert!(profiles[0].reviews[0].evidence_url.is_some());
    }
}
