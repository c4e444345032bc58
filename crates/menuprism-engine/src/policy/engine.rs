use menuprism_core::record::{MenuHeader, MenuItem, SYSTEM_PASSWORD_SENTINEL};

use crate::context::Caller;

use super::flags::{holds_all, holds_any, letters, missing, shared};

/// Which predicate denied access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    Deleted,
    SecurityLevel,
    DownloadLevel,
    /// Required bits the caller lacks.
    RequiredFlags(u16),
    /// Conditional bits the caller lacks.
    ConditionalFlags(u16),
    /// Restriction bits the caller holds.
    Restricted(u16),
    OperatorOnly,
    CoOperatorOnly,
}

impl DenyReason {
    pub fn describe(&self) -> String {
        match self {
            DenyReason::Deleted => "deleted".into(),
            DenyReason::SecurityLevel => "security level".into(),
            DenyReason::DownloadLevel => "download security level".into(),
            DenyReason::RequiredFlags(m) => format!("missing flags {}", letters(*m)),
            DenyReason::ConditionalFlags(m) => format!("missing conditional flags {}", letters(*m)),
            DenyReason::Restricted(m) => format!("restricted by {}", letters(*m)),
            DenyReason::OperatorOnly => "operator only".into(),
            DenyReason::CoOperatorOnly => "co-operator only".into(),
        }
    }
}

/// Outcome of evaluating one record against a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
    /// Every other predicate passed; the caller must answer with `expected`.
    Challenge { expected: String },
}

impl AccessDecision {
    /// Settle a decision with the caller's password answer.
    /// `answer` is only consulted for a challenge.
    pub fn settle(&self, answer: impl FnOnce() -> String) -> bool {
        match self {
            AccessDecision::Allow => true,
            AccessDecision::Deny(_) => false,
            AccessDecision::Challenge { expected } => answer() == *expected,
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Authorization evaluator for menu headers and items.
/// Construct once per engine and share.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    system_password: String,
}

impl AccessPolicy {
    pub fn new(system_password: impl Into<String>) -> Self {
        Self {
            system_password: system_password.into(),
        }
    }

    /// Header (menu entry) check.
    ///
    /// The conditional-flag and restriction predicates do not deny outright
    /// here: the first offending bit makes the verdict
    /// `caller.dsl < header.min_dsl`, skipping the remaining predicates.
    /// Item checks deny on the same conditions.
    pub fn evaluate_header(
        &self,
        header: &MenuHeader,
        caller: &Caller,
        check_password: bool,
    ) -> AccessDecision {
        if header.deleted {
            return AccessDecision::Deny(DenyReason::Deleted);
        }
        if caller.sl < header.min_sl {
            return AccessDecision::Deny(DenyReason::SecurityLevel);
        }
        if caller.dsl < header.min_dsl {
            return AccessDecision::Deny(DenyReason::DownloadLevel);
        }

        if !holds_all(header.required, caller.flags) {
            return AccessDecision::Deny(DenyReason::RequiredFlags(missing(
                header.required,
                caller.flags,
            )));
        }

        let lacking = missing(header.conditional, caller.conditional_flags);
        if lacking != 0 {
            return dsl_verdict(caller, header.min_dsl, DenyReason::ConditionalFlags(lacking));
        }

        let held = shared(header.restricted, caller.restrictions);
        if held != 0 {
            return dsl_verdict(caller, header.min_dsl, DenyReason::Restricted(held));
        }

        if let Some(reason) = role_denial(header.operator_only, header.co_operator_only, caller) {
            return AccessDecision::Deny(reason);
        }

        self.password_gate(&header.password, check_password)
    }

    /// Item (single command) check.
    pub fn evaluate_item(
        &self,
        item: &MenuItem,
        caller: &Caller,
        check_password: bool,
    ) -> AccessDecision {
        if item.deleted {
            return AccessDecision::Deny(DenyReason::Deleted);
        }
        if caller.sl < item.min_sl || (item.max_sl != 0 && caller.sl > item.max_sl) {
            return AccessDecision::Deny(DenyReason::SecurityLevel);
        }
        if caller.dsl < item.min_dsl || (item.max_dsl != 0 && caller.dsl > item.max_dsl) {
            return AccessDecision::Deny(DenyReason::DownloadLevel);
        }

        if !holds_all(item.required, caller.flags) {
            return AccessDecision::Deny(DenyReason::RequiredFlags(missing(
                item.required,
                caller.flags,
            )));
        }
        if !holds_all(item.conditional, caller.conditional_flags) {
            return AccessDecision::Deny(DenyReason::ConditionalFlags(missing(
                item.conditional,
                caller.conditional_flags,
            )));
        }
        if holds_any(item.restricted, caller.restrictions) {
            return AccessDecision::Deny(DenyReason::Restricted(shared(
                item.restricted,
                caller.restrictions,
            )));
        }

        if let Some(reason) = role_denial(item.operator_only, item.co_operator_only, caller) {
            return AccessDecision::Deny(reason);
        }

        self.password_gate(&item.password, check_password)
    }

    /// Boolean header check; `answer` supplies the password when challenged.
    pub fn header_allowed(
        &self,
        header: &MenuHeader,
        caller: &Caller,
        check_password: bool,
        answer: impl FnOnce() -> String,
    ) -> bool {
        self.evaluate_header(header, caller, check_password).settle(answer)
    }

    /// Boolean item check; `answer` supplies the password when challenged.
    pub fn item_allowed(
        &self,
        item: &MenuItem,
        caller: &Caller,
        check_password: bool,
        answer: impl FnOnce() -> String,
    ) -> bool {
        self.evaluate_item(item, caller, check_password).settle(answer)
    }

    /// Secret a record's password field resolves to.
    pub fn expected_secret(&self, password: &str) -> String {
        if password == SYSTEM_PASSWORD_SENTINEL {
            self.system_password.clone()
        } else {
            password.to_string()
        }
    }

    fn password_gate(&self, password: &str, check_password: bool) -> AccessDecision {
        if password.is_empty() || !check_password {
            return AccessDecision::Allow;
        }
        AccessDecision::Challenge {
            expected: self.expected_secret(password),
        }
    }
}

fn dsl_verdict(caller: &Caller, min_dsl: u16, reason: DenyReason) -> AccessDecision {
    if caller.dsl < min_dsl {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(reason)
    }
}

fn role_denial(operator_only: bool, co_operator_only: bool, caller: &Caller) -> Option<DenyReason> {
    if operator_only && !caller.operator {
        return Some(DenyReason::OperatorOnly);
    }
    if co_operator_only && !caller.co_operator {
        return Some(DenyReason::CoOperatorOnly);
    }
    None
}
