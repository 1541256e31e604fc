/*
 * Responsibility
 * - Static authorization policy: which authorities each operation requires
 * - Plain data evaluated by `decide`; an operation missing from the table is denied
 */
use std::fmt;

use crate::domain::authority::AuthoritySet;

pub const ROLE_STUDENT: &str = "ROLE_STUDENT";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListCourses,
    CreateCourse,
    DescribeSelf,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListCourses => "list_courses",
            Self::CreateCourse => "create_course",
            Self::DescribeSelf => "describe_self",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated principal, even with no authorities.
    Authenticated,
    /// At least one of the listed authorities.
    AnyOf(&'static [&'static str]),
    /// Every listed authority.
    AllOf(&'static [&'static str]),
}

impl Requirement {
    pub fn is_satisfied_by(&self, authorities: &AuthoritySet) -> bool {
        match self {
            Self::Authenticated => true,
            Self::AnyOf(names) => authorities.contains_any(names),
            Self::AllOf(names) => authorities.contains_all(names),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    pub operation: Operation,
    pub requirement: Requirement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

pub static ROUTE_GUARDS: [RouteGuard; 3] = [
    RouteGuard {
        operation: Operation::ListCourses,
        requirement: Requirement::AnyOf(&[ROLE_STUDENT, ROLE_ADMIN]),
    },
    RouteGuard {
        operation: Operation::CreateCourse,
        requirement: Requirement::AllOf(&[ROLE_ADMIN]),
    },
    RouteGuard {
        operation: Operation::DescribeSelf,
        requirement: Requirement::Authenticated,
    },
];

pub fn guard_for(operation: Operation) -> Option<&'static RouteGuard> {
    ROUTE_GUARDS.iter().find(|g| g.operation == operation)
}

/// An operation without a guard is denied.
pub fn decide(operation: Operation, authorities: &AuthoritySet) -> Decision {
    match guard_for(operation) {
        Some(guard) if guard.requirement.is_satisfied_by(authorities) => Decision::Allow,
        _ => Decision::Deny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> AuthoritySet {
        names.iter().copied().collect()
    }

    #[test]
    fn every_operation_has_exactly_one_guard() {
        for op in [
            Operation::ListCourses,
            Operation::CreateCourse,
            Operation::DescribeSelf,
        ] {
            assert_eq!(
                ROUTE_GUARDS.iter().filter(|g| g.operation == op).count(),
                1,
                "{op}"
            );
        }
    }

    #[test]
    fn student_may_list_but_not_create() {
        let student = set(&[ROLE_STUDENT]);

        assert_eq!(decide(Operation::ListCourses, &student), Decision::Allow);
        assert_eq!(decide(Operation::CreateCourse, &student), Decision::Deny);
        assert_eq!(decide(Operation::DescribeSelf, &student), Decision::Allow);
    }

    #[test]
    fn admin_may_list_and_create() {
        let admin = set(&[ROLE_ADMIN]);

        assert_eq!(decide(Operation::ListCourses, &admin), Decision::Allow);
        assert_eq!(decide(Operation::CreateCourse, &admin), Decision::Allow);
    }

    #[test]
    fn empty_authorities_may_only_describe_self() {
        let none = AuthoritySet::empty();

        assert_eq!(decide(Operation::DescribeSelf, &none), Decision::Allow);
        assert_eq!(decide(Operation::ListCourses, &none), Decision::Deny);
        assert_eq!(decide(Operation::CreateCourse, &none), Decision::Deny);
    }

    #[test]
    fn unrelated_or_differently_cased_roles_do_not_match() {
        let other = set(&["ROLE_TEACHER", "role_admin", "ADMIN"]);

        assert_eq!(decide(Operation::ListCourses, &other), Decision::Deny);
        assert_eq!(decide(Operation::CreateCourse, &other), Decision::Deny);
    }

    #[test]
    fn all_of_requires_every_listed_authority() {
        let req = Requirement::AllOf(&["A", "B"]);

        assert!(!req.is_satisfied_by(&set(&["A"])));
        assert!(req.is_satisfied_by(&set(&["A", "B", "C"])));
    }
}
