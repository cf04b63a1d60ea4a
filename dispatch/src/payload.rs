//! Request payloads accepted by the dispatch layer.
//!
//! Payloads are checked for shape only: required fields must be present with
//! the right JSON type and dates must be `YYYY-MM-DD`. Value ranges are the
//! stored procedures' business.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /insertar-personas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPeopleRequest {
    /// Number of people to generate
    pub cantidad: i64,
    /// Gender filter; empty or absent means "any"
    #[serde(default)]
    pub genero: Option<String>,
    /// Lower bound of the generated birth dates
    pub fecha_inicio: NaiveDate,
    /// Upper bound of the generated birth dates
    pub fecha_fin: NaiveDate,
}

impl InsertPeopleRequest {
    /// Gender as handed to the procedure. An empty string is the same as no
    /// gender at all; anything else passes through untouched.
    pub fn normalized_gender(&self) -> Option<&str> {
        match self.genero.as_deref() {
            Some("") | None => None,
            Some(genero) => Some(genero),
        }
    }
}

/// Body of `POST /insertar-usuario`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertUsersRequest {
    /// Number of users to create
    pub cantidad: i64,
    /// Role the new users are created with
    pub tipo_usuario: String,
    pub edad_minima: i64,
    pub edad_maxima: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn people(genero: Option<&str>) -> InsertPeopleRequest {
        InsertPeopleRequest {
            cantidad: 5,
            genero: genero.map(str::to_string),
            fecha_inicio: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            fecha_fin: NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
        }
    }

    #[test]
    fn empty_gender_is_absent() {
        assert_eq!(people(Some("")).normalized_gender(), None);
        assert_eq!(people(None).normalized_gender(), None);
    }

    #[test]
    fn explicit_gender_passes_through() {
        assert_eq!(people(Some("F")).normalized_gender(), Some("F"));
        // Whitespace is not trimmed
        assert_eq!(people(Some(" ")).normalized_gender(), Some(" "));
    }

    #[test]
    fn deserialize_people_with_camel_case_dates() {
        let json = r#"{"cantidad":5,"genero":"","fechaInicio":"2020-01-01","fechaFin":"2020-12-31"}"#;
        let req: InsertPeopleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req, people(Some("")));
    }

    #[test]
    fn gender_may_be_omitted_or_null() {
        let omitted = r#"{"cantidad":5,"fechaInicio":"2020-01-01","fechaFin":"2020-12-31"}"#;
        let null = r#"{"cantidad":5,"genero":null,"fechaInicio":"2020-01-01","fechaFin":"2020-12-31"}"#;

        let omitted: InsertPeopleRequest = serde_json::from_str(omitted).unwrap();
        let null: InsertPeopleRequest = serde_json::from_str(null).unwrap();
        assert_eq!(omitted.genero, None);
        assert_eq!(null.genero, None);
    }

    #[test]
    fn malformed_date_is_rejected() {
        let json = r#"{"cantidad":5,"fechaInicio":"01/01/2020","fechaFin":"2020-12-31"}"#;
        assert!(serde_json::from_str::<InsertPeopleRequest>(json).is_err());
    }

    #[test]
    fn missing_count_is_rejected() {
        let json = r#"{"tipo_usuario":"admin","edad_minima":18,"edad_maxima":65}"#;
        assert!(serde_json::from_str::<InsertUsersRequest>(json).is_err());
    }

    #[test]
    fn out_of_range_values_are_accepted() {
        let json = r#"{"cantidad":-3,"tipo_usuario":"","edad_minima":70,"edad_maxima":18}"#;
        let req: InsertUsersRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.cantidad, -3);
        assert_eq!(req.edad_minima, 70);
        assert_eq!(req.edad_maxima, 18);
    }

    proptest! {
        #[test]
        fn non_empty_gender_is_unchanged(genero in ".+") {
            let req = people(Some(&genero));
            prop_assert_eq!(req.normalized_gender(), Some(genero.as_str()));
        }
    }
}
