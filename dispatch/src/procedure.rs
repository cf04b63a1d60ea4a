//! The stored procedures behind each endpoint and how they are called.

use crate::payload::{InsertPeopleRequest, InsertUsersRequest};
use chrono::NaiveDate;
use std::fmt;

/// One of the four stored procedures the service fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    InsertPeople,
    InsertUsers,
    AssignRoles,
    ClearPeople,
}

impl Procedure {
    /// All procedures, in endpoint order.
    pub const ALL: [Procedure; 4] = [
        Procedure::InsertPeople,
        Procedure::InsertUsers,
        Procedure::AssignRoles,
        Procedure::ClearPeople,
    ];

    /// Name of the routine inside the database.
    pub fn name(self) -> &'static str {
        match self {
            Procedure::InsertPeople => "SP_InsertarPersonas",
            Procedure::InsertUsers => "SP_InsertaUsuariosPersonas",
            Procedure::AssignRoles => "SP_InsertaRolesPersonas",
            Procedure::ClearPeople => "SP_LimpiarPersonas",
        }
    }

    /// Number of positional parameters the routine takes.
    pub fn arity(self) -> usize {
        match self {
            Procedure::InsertPeople | Procedure::InsertUsers => 4,
            Procedure::AssignRoles | Procedure::ClearPeople => 0,
        }
    }

    /// Confirmation returned to the client on success.
    pub fn success_message(self) -> &'static str {
        match self {
            Procedure::InsertPeople => "Personas insertadas correctamente.",
            Procedure::InsertUsers => "Usuarios insertados correctamente.",
            Procedure::AssignRoles => "Roles asignados correctamente.",
            Procedure::ClearPeople => "Tabla de personas limpiada correctamente.",
        }
    }

    /// Fixed error category returned to the client on failure.
    pub fn failure_category(self) -> &'static str {
        match self {
            Procedure::InsertPeople => "Error al insertar personas",
            Procedure::InsertUsers => "Error al insertar usuarios",
            Procedure::AssignRoles => "Error al asignar roles",
            Procedure::ClearPeople => "Error al limpiar la tabla de personas",
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcArg {
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl From<i64> for ProcArg {
    fn from(value: i64) -> Self {
        ProcArg::Int(value)
    }
}

impl From<&str> for ProcArg {
    fn from(value: &str) -> Self {
        ProcArg::Text(value.to_string())
    }
}

impl From<NaiveDate> for ProcArg {
    fn from(value: NaiveDate) -> Self {
        ProcArg::Date(value)
    }
}

impl<T: Into<ProcArg>> From<Option<T>> for ProcArg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ProcArg::Null)
    }
}

/// A fully bound procedure invocation, ready to hand to a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureCall {
    pub procedure: Procedure,
    pub args: Vec<ProcArg>,
}

impl ProcedureCall {
    /// `SP_InsertarPersonas(cantidad, genero, fechaInicio, fechaFin)`.
    pub fn insert_people(request: &InsertPeopleRequest) -> Self {
        Self {
            procedure: Procedure::InsertPeople,
            args: vec![
                request.cantidad.into(),
                request.normalized_gender().into(),
                request.fecha_inicio.into(),
                request.fecha_fin.into(),
            ],
        }
    }

    /// `SP_InsertaUsuariosPersonas(cantidad, tipo_usuario, edad_minima, edad_maxima)`.
    pub fn insert_users(request: &InsertUsersRequest) -> Self {
        Self {
            procedure: Procedure::InsertUsers,
            args: vec![
                request.cantidad.into(),
                request.tipo_usuario.as_str().into(),
                request.edad_minima.into(),
                request.edad_maxima.into(),
            ],
        }
    }

    pub fn assign_roles() -> Self {
        Self {
            procedure: Procedure::AssignRoles,
            args: Vec::new(),
        }
    }

    pub fn clear_people() -> Self {
        Self {
            procedure: Procedure::ClearPeople,
            args: Vec::new(),
        }
    }

    /// SQL text with one `?` placeholder per argument.
    pub fn statement(&self) -> String {
        let placeholders = vec!["?"; self.args.len()].join(", ");
        format!("CALL {}({})", self.procedure.name(), placeholders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn insert_people_binds_in_order_with_null_gender() {
        let request = InsertPeopleRequest {
            cantidad: 5,
            genero: Some(String::new()),
            fecha_inicio: date(2020, 1, 1),
            fecha_fin: date(2020, 12, 31),
        };

        let call = ProcedureCall::insert_people(&request);
        assert_eq!(call.procedure, Procedure::InsertPeople);
        assert_eq!(
            call.args,
            vec![
                ProcArg::Int(5),
                ProcArg::Null,
                ProcArg::Date(date(2020, 1, 1)),
                ProcArg::Date(date(2020, 12, 31)),
            ]
        );
        assert_eq!(call.statement(), "CALL SP_InsertarPersonas(?, ?, ?, ?)");
    }

    #[test]
    fn insert_people_keeps_explicit_gender() {
        let request = InsertPeopleRequest {
            cantidad: 1,
            genero: Some("F".into()),
            fecha_inicio: date(1990, 6, 1),
            fecha_fin: date(1999, 6, 1),
        };

        let call = ProcedureCall::insert_people(&request);
        assert_eq!(call.args[1], ProcArg::Text("F".into()));
    }

    #[test]
    fn insert_users_binds_in_order() {
        let request = InsertUsersRequest {
            cantidad: 10,
            tipo_usuario: "cliente".into(),
            edad_minima: 18,
            edad_maxima: 60,
        };

        let call = ProcedureCall::insert_users(&request);
        assert_eq!(
            call.args,
            vec![
                ProcArg::Int(10),
                ProcArg::Text("cliente".into()),
                ProcArg::Int(18),
                ProcArg::Int(60),
            ]
        );
        assert_eq!(
            call.statement(),
            "CALL SP_InsertaUsuariosPersonas(?, ?, ?, ?)"
        );
    }

    #[test]
    fn parameterless_calls_render_empty_parens() {
        assert_eq!(
            ProcedureCall::assign_roles().statement(),
            "CALL SP_InsertaRolesPersonas()"
        );
        assert_eq!(
            ProcedureCall::clear_people().statement(),
            "CALL SP_LimpiarPersonas()"
        );
    }

    #[test]
    fn arity_matches_constructors() {
        let people = InsertPeopleRequest {
            cantidad: 0,
            genero: None,
            fecha_inicio: date(2000, 1, 1),
            fecha_fin: date(2000, 1, 1),
        };
        let users = InsertUsersRequest {
            cantidad: 0,
            tipo_usuario: String::new(),
            edad_minima: 0,
            edad_maxima: 0,
        };

        for call in [
            ProcedureCall::insert_people(&people),
            ProcedureCall::insert_users(&users),
            ProcedureCall::assign_roles(),
            ProcedureCall::clear_people(),
        ] {
            assert_eq!(call.args.len(), call.procedure.arity(), "{}", call.procedure);
        }
    }

    #[test]
    fn messages_are_non_empty() {
        for procedure in Procedure::ALL {
            assert!(!procedure.success_message().is_empty());
            assert!(!procedure.failure_category().is_empty());
        }
    }
}
