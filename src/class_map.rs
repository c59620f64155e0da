// 🏷️ Ontology Class Mapper - free-text type labels → ontology classes
//
// Static, many-to-one table. A label is looked up after cleaning and
// lower-casing; an entry is only honoured when its class belongs to the
// family being mapped, otherwise the family default is returned.

use crate::normalize::clean_text;
use crate::ontology::{ClassCategory, OntologyClass};
use once_cell::sync::Lazy;
use std::collections::HashMap;

// ============================================================================
// FAMILIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappedFamily {
    Institution,
    Company,
    Exhibition,
    Artwork,
    Catalog,
}

impl MappedFamily {
    pub fn category(&self) -> ClassCategory {
        match self {
            MappedFamily::Institution => ClassCategory::Institution,
            MappedFamily::Company => ClassCategory::Company,
            MappedFamily::Exhibition => ClassCategory::Exhibition,
            MappedFamily::Artwork => ClassCategory::Artwork,
            MappedFamily::Catalog => ClassCategory::Catalog,
        }
    }

    pub fn default_class(&self) -> OntologyClass {
        match self {
            MappedFamily::Institution => OntologyClass::Institution,
            MappedFamily::Company => OntologyClass::Company,
            MappedFamily::Exhibition => OntologyClass::Exhibition,
            MappedFamily::Artwork => OntologyClass::WorkManifestation,
            MappedFamily::Catalog => OntologyClass::Catalog,
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

const CLASS_TABLE: &[(&str, OntologyClass)] = &[
    // Institutions
    ("museo", OntologyClass::Museum),
    ("museum", OntologyClass::Museum),
    ("museo nacional", OntologyClass::Museum),
    ("museo de arte", OntologyClass::Museum),
    ("museo de arte contemporáneo", OntologyClass::Museum),
    ("casa museo", OntologyClass::Museum),
    ("centro de arte", OntologyClass::ArtCenter),
    ("art center", OntologyClass::ArtCenter),
    ("centro de arte contemporáneo", OntologyClass::ArtCenter),
    ("kunsthalle", OntologyClass::ArtCenter),
    ("sala de exposiciones", OntologyClass::ArtGallery),
    ("galería de arte pública", OntologyClass::ArtGallery),
    ("galería pública", OntologyClass::ArtGallery),
    ("public gallery", OntologyClass::ArtGallery),
    ("fundación", OntologyClass::CulturalFoundation),
    ("fundacion", OntologyClass::CulturalFoundation),
    ("foundation", OntologyClass::CulturalFoundation),
    ("fundación privada", OntologyClass::CulturalFoundation),
    ("universidad", OntologyClass::University),
    ("university", OntologyClass::University),
    ("facultad de bellas artes", OntologyClass::University),
    ("biblioteca", OntologyClass::Library),
    ("library", OntologyClass::Library),
    ("archivo", OntologyClass::Archive),
    ("archive", OntologyClass::Archive),
    ("centro cultural", OntologyClass::CulturalCenter),
    ("cultural center", OntologyClass::CulturalCenter),
    ("casa de cultura", OntologyClass::CulturalCenter),
    ("ateneo", OntologyClass::CulturalCenter),
    ("ayuntamiento", OntologyClass::PublicAdministration),
    ("diputación", OntologyClass::PublicAdministration),
    ("ministerio", OntologyClass::PublicAdministration),
    ("gobierno autonómico", OntologyClass::PublicAdministration),
    ("administración pública", OntologyClass::PublicAdministration),
    ("public administration", OntologyClass::PublicAdministration),
    ("asociación", OntologyClass::Association),
    ("asociacion", OntologyClass::Association),
    ("association", OntologyClass::Association),
    ("colectivo", OntologyClass::Association),
    ("escuela de arte", OntologyClass::ArtSchool),
    ("escuela de bellas artes", OntologyClass::ArtSchool),
    ("art school", OntologyClass::ArtSchool),
    ("centro de investigación", OntologyClass::ResearchCenter),
    ("research center", OntologyClass::ResearchCenter),
    ("instituto", OntologyClass::ResearchCenter),
    ("institución religiosa", OntologyClass::ReligiousInstitution),
    ("iglesia", OntologyClass::ReligiousInstitution),
    ("monasterio", OntologyClass::ReligiousInstitution),
    ("real academia", OntologyClass::Academy),
    ("academia", OntologyClass::Academy),
    ("academy", OntologyClass::Academy),
    ("embajada", OntologyClass::DiplomaticMission),
    ("consulado", OntologyClass::DiplomaticMission),
    ("embassy", OntologyClass::DiplomaticMission),
    // Companies
    ("editorial", OntologyClass::PublishingHouse),
    ("publisher", OntologyClass::PublishingHouse),
    ("publishing house", OntologyClass::PublishingHouse),
    ("imprenta", OntologyClass::PrintingHouse),
    ("printing house", OntologyClass::PrintingHouse),
    ("galería", OntologyClass::CommercialGallery),
    ("galeria", OntologyClass::CommercialGallery),
    ("galería comercial", OntologyClass::CommercialGallery),
    ("commercial gallery", OntologyClass::CommercialGallery),
    ("casa de subastas", OntologyClass::AuctionHouse),
    ("auction house", OntologyClass::AuctionHouse),
    ("productora", OntologyClass::ProductionCompany),
    ("production company", OntologyClass::ProductionCompany),
    ("transporte de obras de arte", OntologyClass::TransportCompany),
    ("empresa de transporte", OntologyClass::TransportCompany),
    ("aseguradora", OntologyClass::InsuranceCompany),
    ("insurance company", OntologyClass::InsuranceCompany),
    ("estudio de diseño", OntologyClass::DesignStudio),
    ("design studio", OntologyClass::DesignStudio),
    ("banco", OntologyClass::FinancialEntity),
    ("caja de ahorros", OntologyClass::FinancialEntity),
    ("bank", OntologyClass::FinancialEntity),
    // Exhibitions
    ("individual", OntologyClass::SoloExhibition),
    ("exposición individual", OntologyClass::SoloExhibition),
    ("solo exhibition", OntologyClass::SoloExhibition),
    ("colectiva", OntologyClass::GroupExhibition),
    ("exposición colectiva", OntologyClass::GroupExhibition),
    ("group exhibition", OntologyClass::GroupExhibition),
    ("retrospectiva", OntologyClass::RetrospectiveExhibition),
    ("retrospective", OntologyClass::RetrospectiveExhibition),
    ("antológica", OntologyClass::RetrospectiveExhibition),
    ("itinerante", OntologyClass::TravellingExhibition),
    ("exposición itinerante", OntologyClass::TravellingExhibition),
    ("travelling exhibition", OntologyClass::TravellingExhibition),
    ("permanente", OntologyClass::PermanentExhibition),
    ("colección permanente", OntologyClass::PermanentExhibition),
    ("permanent exhibition", OntologyClass::PermanentExhibition),
    ("temporal", OntologyClass::TemporaryExhibition),
    ("exposición temporal", OntologyClass::TemporaryExhibition),
    ("temporary exhibition", OntologyClass::TemporaryExhibition),
    ("feria", OntologyClass::ArtFair),
    ("feria de arte", OntologyClass::ArtFair),
    ("art fair", OntologyClass::ArtFair),
    ("bienal", OntologyClass::Biennial),
    ("biennial", OntologyClass::Biennial),
    ("trienal", OntologyClass::Biennial),
    ("virtual", OntologyClass::VirtualExhibition),
    ("exposición virtual", OntologyClass::VirtualExhibition),
    ("online exhibition", OntologyClass::VirtualExhibition),
    ("festival", OntologyClass::Festival),
    ("muestra", OntologyClass::Festival),
    // Work manifestations
    ("pintura", OntologyClass::Painting),
    ("painting", OntologyClass::Painting),
    ("óleo", OntologyClass::Painting),
    ("acuarela", OntologyClass::Painting),
    ("escultura", OntologyClass::Sculpture),
    ("sculpture", OntologyClass::Sculpture),
    ("fotografía", OntologyClass::Photograph),
    ("fotografia", OntologyClass::Photograph),
    ("photograph", OntologyClass::Photograph),
    ("photography", OntologyClass::Photograph),
    ("dibujo", OntologyClass::Drawing),
    ("drawing", OntologyClass::Drawing),
    ("grabado", OntologyClass::Print),
    ("serigrafía", OntologyClass::Print),
    ("litografía", OntologyClass::Print),
    ("print", OntologyClass::Print),
    ("obra gráfica", OntologyClass::Print),
    ("instalación", OntologyClass::Installation),
    ("instalacion", OntologyClass::Installation),
    ("installation", OntologyClass::Installation),
    ("videoarte", OntologyClass::VideoArt),
    ("vídeo", OntologyClass::VideoArt),
    ("video", OntologyClass::VideoArt),
    ("performance", OntologyClass::Performance),
    ("acción", OntologyClass::Performance),
    ("textil", OntologyClass::TextileWork),
    ("tapiz", OntologyClass::TextileWork),
    ("textile", OntologyClass::TextileWork),
    ("cerámica", OntologyClass::Ceramic),
    ("ceramic", OntologyClass::Ceramic),
    ("collage", OntologyClass::Collage),
    ("libro de artista", OntologyClass::ArtistBook),
    ("artist book", OntologyClass::ArtistBook),
    ("cartel", OntologyClass::Poster),
    ("poster", OntologyClass::Poster),
    ("técnica mixta", OntologyClass::MixedMedia),
    ("mixed media", OntologyClass::MixedMedia),
    ("arquitectura", OntologyClass::ArchitecturalWork),
    ("maqueta", OntologyClass::ArchitecturalWork),
    ("joyería", OntologyClass::Jewellery),
    ("jewellery", OntologyClass::Jewellery),
    ("arte digital", OntologyClass::DigitalArt),
    ("digital art", OntologyClass::DigitalArt),
    ("cine", OntologyClass::Film),
    ("película", OntologyClass::Film),
    ("film", OntologyClass::Film),
    ("arte sonoro", OntologyClass::SoundArt),
    ("sound art", OntologyClass::SoundArt),
    // Catalogs
    ("catálogo de exposición", OntologyClass::ExhibitionCatalog),
    ("catalogo de exposicion", OntologyClass::ExhibitionCatalog),
    ("exhibition catalog", OntologyClass::ExhibitionCatalog),
    ("catálogo razonado", OntologyClass::CatalogueRaisonne),
    ("catalogue raisonné", OntologyClass::CatalogueRaisonne),
    ("catálogo de colección", OntologyClass::CollectionCatalog),
    ("collection catalog", OntologyClass::CollectionCatalog),
    ("catálogo de subasta", OntologyClass::AuctionCatalog),
    ("auction catalog", OntologyClass::AuctionCatalog),
    ("folleto", OntologyClass::Brochure),
    ("díptico", OntologyClass::Brochure),
    ("tríptico", OntologyClass::Brochure),
    ("brochure", OntologyClass::Brochure),
    ("catálogo digital", OntologyClass::DigitalCatalog),
    ("digital catalog", OntologyClass::DigitalCatalog),
    ("revista", OntologyClass::Periodical),
    ("periodical", OntologyClass::Periodical),
];

static CLASS_INDEX: Lazy<HashMap<&'static str, OntologyClass>> =
    Lazy::new(|| CLASS_TABLE.iter().copied().collect());

/// Number of labels the mapper knows about
pub fn table_size() -> usize {
    CLASS_INDEX.len()
}

/// Map a free-text type label to an ontology class of the given family.
pub fn map_class(family: MappedFamily, label: Option<&str>) -> OntologyClass {
    let key = match label.and_then(clean_text) {
        Some(text) => text.to_lowercase(),
        None => return family.default_class(),
    };

    match CLASS_INDEX.get(key.as_str()) {
        Some(class) if class.category() == family.category() => *class,
        _ => family.default_class(),
    }
}
