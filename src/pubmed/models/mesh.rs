use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::xml::{
    FromXml, XmlNode, attribute_or_default, child_list, optional_attribute_flag,
    required_attribute, required_child, required_child_text,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifierName {
    pub name: String,
    pub ui: Option<String>,
    pub major_topic: bool,
}

impl FromXml for QualifierName {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            name: node.text(),
            ui: node.attribute("UI").map(str::to_string),
            major_topic: optional_attribute_flag(node, "MajorTopicYN", false)?,
        })
    }
}

/// MeSH descriptor with its qualifiers
///
/// `major_topic` is the descriptor's own flag. A heading can still be a major
/// topic through one of its qualifiers, see [`MeshHeading::is_major`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshHeading {
    pub descriptor_name: String,
    pub descriptor_ui: Option<String>,
    pub descriptor_type: Option<String>,
    pub major_topic: bool,
    pub qualifiers: Vec<QualifierName>,
}

impl MeshHeading {
    /// Descriptor or any qualifier marked as major topic
    pub fn is_major(&self) -> bool {
        self.major_topic || self.qualifiers.iter().any(|q| q.major_topic)
    }
}

impl FromXml for MeshHeading {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        let descriptor = required_child(node, "DescriptorName")?;
        Ok(Self {
            descriptor_name: descriptor.text(),
            descriptor_ui: descriptor.attribute("UI").map(str::to_string),
            descriptor_type: descriptor.attribute("Type").map(str::to_string),
            major_topic: optional_attribute_flag(descriptor, "MajorTopicYN", false)?,
            qualifiers: child_list(Some(node), "QualifierName", QualifierName::from_xml)?,
        })
    }
}

/// Supplementary concept record term (`SupplMeshName`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplMeshName {
    pub name: String,
    pub ui: Option<String>,
    pub suppl_type: String,
}

impl FromXml for SupplMeshName {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            name: node.text(),
            ui: node.attribute("UI").map(str::to_string),
            suppl_type: required_attribute(node, "Type")?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chemical {
    pub registry_number: String,
    pub substance_name: String,
    pub substance_ui: Option<String>,
}

impl FromXml for Chemical {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        let substance = required_child(node, "NameOfSubstance")?;
        Ok(Self {
            registry_number: required_child_text(node, "RegistryNumber")?,
            substance_name: substance.text(),
            substance_ui: substance.attribute("UI").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub major_topic: bool,
}

impl FromXml for Keyword {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            text: node.text(),
            major_topic: optional_attribute_flag(node, "MajorTopicYN", false)?,
        })
    }
}

/// Keywords supplied by one owner (NLM, the author, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordList {
    pub owner: String,
    pub keywords: Vec<Keyword>,
}

impl FromXml for KeywordList {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            owner: attribute_or_default(node, "Owner", "NLM").to_string(),
            keywords: child_list(Some(node), "Keyword", Keyword::from_xml)?,
        })
    }
}
