use serde::{Deserialize, Serialize};

use crate::error::{PubMedError, Result};
use crate::xml::{
    FromXml, XmlNode, child_list, optional_child_int, optional_child_text, required_child_text,
};

/// Searchable field of an Entrez database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub term_count: Option<String>,
    pub is_date: bool,
    pub is_numerical: bool,
    pub single_token: bool,
    pub hierarchy: bool,
    pub is_hidden: bool,
    pub is_rangeable: bool,
    pub is_truncatable: bool,
}

/// Element text `Y` / `N`; absent means `N`
fn yes_no(node: &XmlNode, tag: &str) -> Result<bool> {
    match optional_child_text(node, tag).as_deref() {
        None | Some("N") => Ok(false),
        Some("Y") => Ok(true),
        Some(other) => Err(PubMedError::MalformedField {
            path: format!("{}/{}", node.path(), tag),
            value: other.to_string(),
            expected: "Y or N",
        }),
    }
}

impl FromXml for FieldInfo {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            name: required_child_text(node, "Name")?,
            full_name: optional_child_text(node, "FullName").unwrap_or_default(),
            description: optional_child_text(node, "Description").unwrap_or_default(),
            term_count: optional_child_text(node, "TermCount"),
            is_date: yes_no(node, "IsDate")?,
            is_numerical: yes_no(node, "IsNumerical")?,
            single_token: yes_no(node, "SingleToken")?,
            hierarchy: yes_no(node, "Hierarchy")?,
            is_hidden: yes_no(node, "IsHidden")?,
            // the service spells it "Rangable"
            is_rangeable: yes_no(node, "IsRangable")?,
            is_truncatable: yes_no(node, "IsTruncatable")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub name: String,
    pub menu: String,
    pub description: String,
    pub db_to: String,
}

impl FromXml for LinkInfo {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            name: required_child_text(node, "Name")?,
            menu: optional_child_text(node, "Menu").unwrap_or_default(),
            description: optional_child_text(node, "Description").unwrap_or_default(),
            db_to: required_child_text(node, "DbTo")?,
        })
    }
}

/// EInfo description of one database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub db_name: String,
    pub menu_name: String,
    pub description: String,
    pub db_build: Option<String>,
    pub warning: Option<String>,
    pub count: Option<u64>,
    pub last_update: Option<String>,
    pub fields: Vec<FieldInfo>,
    pub links: Vec<LinkInfo>,
}

impl DatabaseInfo {
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Parse an `eInfoResult` document requested for `requested_db`
    pub(crate) fn from_result(root: &XmlNode, requested_db: &str) -> Result<Self> {
        let unknown = || PubMedError::UnknownDatabase {
            name: requested_db.to_string(),
        };

        if root.child("ERROR").is_some() {
            return Err(unknown());
        }
        root.child("DbInfo").ok_or_else(unknown).and_then(Self::from_xml)
    }
}

impl FromXml for DatabaseInfo {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            db_name: required_child_text(node, "DbName")?,
            menu_name: optional_child_text(node, "MenuName").unwrap_or_default(),
            description: optional_child_text(node, "Description").unwrap_or_default(),
            db_build: optional_child_text(node, "DbBuild"),
            warning: optional_child_text(node, "Warning"),
            count: optional_child_int(node, "Count")?,
            last_update: optional_child_text(node, "LastUpdate"),
            fields: child_list(node.child("FieldList"), "Field", FieldInfo::from_xml)?,
            links: child_list(node.child("LinkList"), "Link", LinkInfo::from_xml)?,
        })
    }
}
