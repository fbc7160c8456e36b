use serde::{Deserialize, Serialize};

use super::article::{Article, OtherAbstract};
use super::author::{Investigator, PersonalNameSubject};
use super::dates::Date;
use super::identifiers::OtherId;
use super::journal::MedlineJournalInfo;
use super::mesh::{Chemical, KeywordList, MeshHeading, SupplMeshName};
use crate::error::Result;
use crate::xml::{
    FromXml, XmlNode, attribute_or_default, child_list, child_texts, optional_child,
    optional_child_text, required_attribute, required_child, required_child_text,
};

/// Link to a related citation (erratum, comment, retraction, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsCorrections {
    pub ref_type: String,
    pub ref_source: String,
    pub pmid: Option<String>,
    pub note: Option<String>,
}

impl FromXml for CommentsCorrections {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            ref_type: required_attribute(node, "RefType")?.to_string(),
            ref_source: required_child_text(node, "RefSource")?,
            pmid: optional_child_text(node, "PMID"),
            note: optional_child_text(node, "Note"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralNote {
    pub owner: String,
    pub text: String,
}

impl FromXml for GeneralNote {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            owner: attribute_or_default(node, "Owner", "NLM").to_string(),
            text: node.text(),
        })
    }
}

/// The bibliographic citation part of a PubMed record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedlineCitation {
    pub owner: String,
    pub status: String,
    pub version_id: Option<String>,
    pub version_date: Option<String>,
    pub indexing_method: Option<String>,
    pub pmid: String,
    pub pmid_version: Option<String>,
    pub date_completed: Option<Date>,
    pub date_revised: Option<Date>,
    pub article: Article,
    pub medline_journal_info: MedlineJournalInfo,
    pub chemicals: Vec<Chemical>,
    pub suppl_mesh_names: Vec<SupplMeshName>,
    pub citation_subsets: Vec<String>,
    pub comments_corrections: Vec<CommentsCorrections>,
    pub gene_symbols: Vec<String>,
    pub mesh_headings: Vec<MeshHeading>,
    pub number_of_references: Option<String>,
    pub personal_name_subjects: Vec<PersonalNameSubject>,
    pub other_ids: Vec<OtherId>,
    pub other_abstracts: Vec<OtherAbstract>,
    pub keyword_lists: Vec<KeywordList>,
    pub coi_statement: Option<String>,
    pub space_flight_missions: Vec<String>,
    pub investigators: Vec<Investigator>,
    pub general_notes: Vec<GeneralNote>,
}

impl FromXml for MedlineCitation {
    fn from_xml(node: &XmlNode) -> Result<Self> {
        let pmid = required_child(node, "PMID")?;

        Ok(Self {
            owner: attribute_or_default(node, "Owner", "NLM").to_string(),
            status: required_attribute(node, "Status")?.to_string(),
            version_id: node.attribute("VersionID").map(str::to_string),
            version_date: node.attribute("VersionDate").map(str::to_string),
            indexing_method: node.attribute("IndexingMethod").map(str::to_string),
            pmid: pmid.text(),
            pmid_version: pmid.attribute("Version").map(str::to_string),
            date_completed: optional_child(node, "DateCompleted", Date::from_xml)?,
            date_revised: optional_child(node, "DateRevised", Date::from_xml)?,
            article: Article::from_xml(required_child(node, "Article")?)?,
            medline_journal_info: MedlineJournalInfo::from_xml(required_child(
                node,
                "MedlineJournalInfo",
            )?)?,
            chemicals: child_list(node.child("ChemicalList"), "Chemical", Chemical::from_xml)?,
            suppl_mesh_names: child_list(
                node.child("SupplMeshList"),
                "SupplMeshName",
                SupplMeshName::from_xml,
            )?,
            citation_subsets: child_texts(Some(node), "CitationSubset"),
            comments_corrections: child_list(
                node.child("CommentsCorrectionsList"),
                "CommentsCorrections",
                CommentsCorrections::from_xml,
            )?,
            gene_symbols: child_texts(node.child("GeneSymbolList"), "GeneSymbol"),
            mesh_headings: child_list(
                node.child("MeshHeadingList"),
                "MeshHeading",
                MeshHeading::from_xml,
            )?,
            number_of_references: optional_child_text(node, "NumberOfReferences"),
            personal_name_subjects: child_list(
                node.child("PersonalNameSubjectList"),
                "PersonalNameSubject",
                PersonalNameSubject::from_xml,
            )?,
            other_ids: child_list(Some(node), "OtherID", OtherId::from_xml)?,
            other_abstracts: child_list(Some(node), "OtherAbstract", OtherAbstract::from_xml)?,
            keyword_lists: child_list(Some(node), "KeywordList", KeywordList::from_xml)?,
            coi_statement: optional_child_text(node, "CoiStatement"),
            space_flight_missions: child_texts(Some(node), "SpaceFlightMission"),
            investigators: child_list(
                node.child("InvestigatorList"),
                "Investigator",
                Investigator::from_xml,
            )?,
            general_notes: child_list(Some(node), "GeneralNote", GeneralNote::from_xml)?,
        })
    }
}
