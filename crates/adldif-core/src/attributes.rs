//! Attribute names and the classification tables that route values to decoders
//!
//! All built-in tables hold case-folded names. Lookups go through
//! [`AttributeName`], which folds the name once per line.

use std::collections::HashSet;

use crate::config::AttributeSettings;

/// Base64 attributes that must never be heuristically rewritten as text
pub const SKIP_CLEAN: &[&str] = &[
    "objectsid",
    "objectguid",
    "ntsecuritydescriptor",
    "msds-generationid",
    "auditingpolicy",
    "dsasignature",
    "ms-ds-creatorsid",
    "logonhours",
    "schemaidguid",
    "msexchmailboxsecuritydescriptor",
    "msexchmailboxguid",
    "thumbnailphoto",
];

/// Attributes holding a binary SID
pub const SID_FIELDS: &[&str] = &["objectsid"];

/// Attributes holding a 100ns tick count since 1601-01-01
pub const DATE_ATTRS: &[&str] = &[
    "pwdlastset",
    "accountexpires",
    "lastlogon",
    "lastlogontimestamp",
    "lastpwdset",
    "badpasswordtime",
];

/// The attribute decoded with [`UAC_FLAGS`]
pub const UAC_ATTRIBUTE: &str = "useraccountcontrol";

/// userAccountControl flags in output order.
///
/// Decoded values list matching names in this order, not in bit order.
pub const UAC_FLAGS: &[(&str, u32)] = &[
    ("SCRIPT", 0x0001),
    ("ACCOUNTDISABLE", 0x0002),
    ("HOMEDIR_REQUIRED", 0x0008),
    ("LOCKOUT", 0x0010),
    ("PASSWD_NOTREQD", 0x0020),
    ("PASSWD_CANT_CHANGE", 0x0040),
    ("ENCRYPTED_TEXT_PWD_ALLOWED", 0x0080),
    ("TEMP_DUPLICATE_ACCOUNT", 0x0100),
    ("NORMAL_ACCOUNT", 0x0200),
    ("INTERDOMAIN_TRUST_ACCOUNT", 0x0800),
    ("WORKSTATION_TRUST_ACCOUNT", 0x1000),
    ("SERVER_TRUST_ACCOUNT", 0x2000),
    ("DONT_EXPIRE_PASSWORD", 0x10000),
    ("MNS_LOGON_ACCOUNT", 0x20000),
    ("SMARTCARD_REQUIRED", 0x40000),
    ("TRUSTED_FOR_DELEGATION", 0x80000),
    ("NOT_DELEGATED", 0x100000),
    ("USE_DES_KEY_ONLY", 0x200000),
    ("DONT_REQ_PREAUTH", 0x400000),
    ("PASSWORD_EXPIRED", 0x800000),
    ("TRUSTED_TO_AUTH_FOR_DELEGATION", 0x1000000),
    ("PARTIAL_SECRETS_ACCOUNT", 0x04000000),
];

/// bof output keeps these base64 values encoded
pub const BOF_BASE64: &[&str] = &[
    "ntsecuritydescriptor",
    "msds-generationid",
    "auditingpolicy",
    "dsasignature",
    "ms-ds-creatorsid",
    "logonhours",
    "schemaidguid",
];

/// bof output renders these as bracketed GUIDs
pub const BOF_BRACKETED: &[&str] = &["objectguid"];

/// bof output drops these attributes entirely
pub const BOF_IGNORE: &[&str] = &["usercertificate"];

/// An attribute token together with its case-folded lookup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeName<'a> {
    raw: &'a str,
    folded: String,
}

impl<'a> AttributeName<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            folded: raw.to_ascii_lowercase(),
        }
    }

    /// The name as it appeared in the input
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Lowercased name used for table lookups
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

/// Every lookup set used by the transformers.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTables {
    pub skip_clean: HashSet<String>,
    pub sid: HashSet<String>,
    pub date: HashSet<String>,
    pub bof_base64: HashSet<String>,
    pub bof_bracketed: HashSet<String>,
    pub bof_ignore: HashSet<String>,
}

impl AttributeTables {
    /// Built-in tables extended with the names listed in configuration.
    ///
    /// A SID attribute is always in the skip-clean set too, otherwise the
    /// text classifier would claim its value first.
    pub fn with_settings(settings: &AttributeSettings) -> Self {
        let mut tables = Self::default();
        extend(&mut tables.skip_clean, &settings.skip_clean);
        extend(&mut tables.skip_clean, &settings.sid);
        extend(&mut tables.sid, &settings.sid);
        extend(&mut tables.date, &settings.date);
        extend(&mut tables.bof_base64, &settings.bof_base64);
        extend(&mut tables.bof_bracketed, &settings.bof_bracketed);
        extend(&mut tables.bof_ignore, &settings.bof_ignore);
        tables
    }

    pub fn is_skip_clean(&self, name: &AttributeName<'_>) -> bool {
        self.skip_clean.contains(name.folded())
    }

    pub fn is_sid(&self, name: &AttributeName<'_>) -> bool {
        self.sid.contains(name.folded())
    }

    pub fn is_date(&self, name: &AttributeName<'_>) -> bool {
        self.date.contains(name.folded())
    }

    pub fn is_uac(&self, name: &AttributeName<'_>) -> bool {
        name.folded() == UAC_ATTRIBUTE
    }

    pub fn is_bof_base64(&self, name: &AttributeName<'_>) -> bool {
        self.bof_base64.contains(name.folded())
    }

    pub fn is_bof_bracketed(&self, name: &AttributeName<'_>) -> bool {
        self.bof_bracketed.contains(name.folded())
    }

    pub fn is_bof_ignored(&self, name: &AttributeName<'_>) -> bool {
        self.bof_ignore.contains(name.folded())
    }
}

impl Default for AttributeTables {
    fn default() -> Self {
        Self {
            skip_clean: to_set(SKIP_CLEAN),
            sid: to_set(SID_FIELDS),
            date: to_set(DATE_ATTRS),
            bof_base64: to_set(BOF_BASE64),
            bof_bracketed: to_set(BOF_BRACKETED),
            bof_ignore: to_set(BOF_IGNORE),
        }
    }
}

fn to_set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn extend(set: &mut HashSet<String>, extra: &[String]) {
    set.extend(
        extra
            .iter()
            .map(|n| n.trim().to_ascii_lowercase())
            .filter(|n| !n.is_empty()),
    );
}
