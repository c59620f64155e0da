// 🏛️ Ontology vocabulary - classes, properties, datatypes
//
// Terms live under `{base}ontology/`. Object properties always come in
// inverse pairs; the graph builder only accepts them through
// `add_bidirectional`, so a one-way relation cannot be written.

use crate::reify::{EventKind, MediatorKind, RoleKind};
use serde::{Deserialize, Serialize};

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

pub const DEFAULT_BASE: &str = "https://w3id.org/heritage-graph/";

// ============================================================================
// CLASS CATEGORY
// ============================================================================

/// Family a class belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassCategory {
    Actant,
    Institution,
    Company,
    Exhibition,
    Artwork,
    Catalog,
    Territory,
    Time,
    Reified,
}

// ============================================================================
// CLASSES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OntologyClass {
    // Human actants
    Person,
    Group,
    HumanActant,

    // Institutions
    Institution,
    Museum,
    ArtCenter,
    ArtGallery,
    CulturalFoundation,
    University,
    Library,
    Archive,
    CulturalCenter,
    PublicAdministration,
    Association,
    ArtSchool,
    ResearchCenter,
    ReligiousInstitution,
    Academy,
    DiplomaticMission,

    // Companies
    Company,
    PublishingHouse,
    PrintingHouse,
    CommercialGallery,
    AuctionHouse,
    ProductionCompany,
    TransportCompany,
    InsuranceCompany,
    DesignStudio,
    FinancialEntity,

    // Exhibitions
    Exhibition,
    SoloExhibition,
    GroupExhibition,
    RetrospectiveExhibition,
    TravellingExhibition,
    PermanentExhibition,
    TemporaryExhibition,
    ArtFair,
    Biennial,
    VirtualExhibition,
    Festival,

    // Work manifestations
    WorkManifestation,
    Painting,
    Sculpture,
    Photograph,
    Drawing,
    Print,
    Installation,
    VideoArt,
    Performance,
    TextileWork,
    Ceramic,
    Collage,
    ArtistBook,
    Poster,
    MixedMedia,
    ArchitecturalWork,
    Jewellery,
    DigitalArt,
    Film,
    SoundArt,

    // Catalogs
    Catalog,
    ExhibitionCatalog,
    CatalogueRaisonne,
    CollectionCatalog,
    AuctionCatalog,
    Brochure,
    DigitalCatalog,
    Periodical,

    // Places
    TerritorialEntity,
    Settlement,
    Region,
    Country,

    // Time
    ExactDate,
    ApproximateDate,

    // Reification
    Role(RoleKind),
    Event(EventKind),
    Mediator(MediatorKind),
}

impl OntologyClass {
    pub fn local_name(&self) -> &'static str {
        use OntologyClass::*;
        match self {
            Person => "Person",
            Group => "Group",
            HumanActant => "HumanActant",
            Institution => "Institution",
            Museum => "Museum",
            ArtCenter => "ArtCenter",
            ArtGallery => "ArtGallery",
            CulturalFoundation => "CulturalFoundation",
            University => "University",
            Library => "Library",
            Archive => "Archive",
            CulturalCenter => "CulturalCenter",
            PublicAdministration => "PublicAdministration",
            Association => "Association",
            ArtSchool => "ArtSchool",
            ResearchCenter => "ResearchCenter",
            ReligiousInstitution => "ReligiousInstitution",
            Academy => "Academy",
            DiplomaticMission => "DiplomaticMission",
            Company => "Company",
            PublishingHouse => "PublishingHouse",
            PrintingHouse => "PrintingHouse",
            CommercialGallery => "CommercialGallery",
            AuctionHouse => "AuctionHouse",
            ProductionCompany => "ProductionCompany",
            TransportCompany => "TransportCompany",
            InsuranceCompany => "InsuranceCompany",
            DesignStudio => "DesignStudio",
            FinancialEntity => "FinancialEntity",
            Exhibition => "Exhibition",
            SoloExhibition => "SoloExhibition",
            GroupExhibition => "GroupExhibition",
            RetrospectiveExhibition => "RetrospectiveExhibition",
            TravellingExhibition => "TravellingExhibition",
            PermanentExhibition => "PermanentExhibition",
            TemporaryExhibition => "TemporaryExhibition",
            ArtFair => "ArtFair",
            Biennial => "Biennial",
            VirtualExhibition => "VirtualExhibition",
            Festival => "Festival",
            WorkManifestation => "WorkManifestation",
            Painting => "Painting",
            Sculpture => "Sculpture",
            Photograph => "Photograph",
            Drawing => "Drawing",
            Print => "Print",
            Installation => "Installation",
            VideoArt => "VideoArt",
            Performance => "Performance",
            TextileWork => "TextileWork",
            Ceramic => "Ceramic",
            Collage => "Collage",
            ArtistBook => "ArtistBook",
            Poster => "Poster",
            MixedMedia => "MixedMedia",
            ArchitecturalWork => "ArchitecturalWork",
            Jewellery => "Jewellery",
            DigitalArt => "DigitalArt",
            Film => "Film",
            SoundArt => "SoundArt",
            Catalog => "Catalog",
            ExhibitionCatalog => "ExhibitionCatalog",
            CatalogueRaisonne => "CatalogueRaisonne",
            CollectionCatalog => "CollectionCatalog",
            AuctionCatalog => "AuctionCatalog",
            Brochure => "Brochure",
            DigitalCatalog => "DigitalCatalog",
            Periodical => "Periodical",
            TerritorialEntity => "TerritorialEntity",
            Settlement => "Settlement",
            Region => "Region",
            Country => "Country",
            ExactDate => "ExactDate",
            ApproximateDate => "ApproximateDate",
            Role(kind) => kind.class_name(),
            Event(kind) => kind.class_name(),
            Mediator(kind) => kind.class_name(),
        }
    }

    pub fn category(&self) -> ClassCategory {
        use OntologyClass::*;
        match self {
            Person | Group | HumanActant => ClassCategory::Actant,
            Institution | Museum | ArtCenter | ArtGallery | CulturalFoundation | University
            | Library | Archive | CulturalCenter | PublicAdministration | Association
            | ArtSchool | ResearchCenter | ReligiousInstitution | Academy
            | DiplomaticMission => ClassCategory::Institution,
            Company | PublishingHouse | PrintingHouse | CommercialGallery | AuctionHouse
            | ProductionCompany | TransportCompany | InsuranceCompany | DesignStudio
            | FinancialEntity => ClassCategory::Company,
            Exhibition | SoloExhibition | GroupExhibition | RetrospectiveExhibition
            | TravellingExhibition | PermanentExhibition | TemporaryExhibition | ArtFair
            | Biennial | VirtualExhibition | Festival => ClassCategory::Exhibition,
            WorkManifestation | Painting | Sculpture | Photograph | Drawing | Print
            | Installation | VideoArt | Performance | TextileWork | Ceramic | Collage
            | ArtistBook | Poster | MixedMedia | ArchitecturalWork | Jewellery | DigitalArt
            | Film | SoundArt => ClassCategory::Artwork,
            Catalog | ExhibitionCatalog | CatalogueRaisonne | CollectionCatalog
            | AuctionCatalog | Brochure | DigitalCatalog | Periodical => ClassCategory::Catalog,
            TerritorialEntity | Settlement | Region | Country => ClassCategory::Territory,
            ExactDate | ApproximateDate => ClassCategory::Time,
            Role(_) | Event(_) | Mediator(_) => ClassCategory::Reified,
        }
    }
}

// ============================================================================
// DATATYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Datatype {
    String,
    Date,
    GYear,
    AnyUri,
    Decimal,
}

impl Datatype {
    pub fn local_name(&self) -> &'static str {
        match self {
            Datatype::String => "string",
            Datatype::Date => "date",
            Datatype::GYear => "gYear",
            Datatype::AnyUri => "anyURI",
            Datatype::Decimal => "decimal",
        }
    }

    pub fn iri(&self) -> String {
        format!("{}{}", XSD, self.local_name())
    }
}

// ============================================================================
// DATA PROPERTIES
// ============================================================================

/// Literal-valued attributes; the datatype follows from the field semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataProperty {
    Gender,
    Nationality,
    Activity,
    SourceType,
    Address,
    Latitude,
    Longitude,
    Isbn,
    Technique,
    Dimensions,
    Position,
    InXsdDate,
    InXsdGYear,
    Uri,
    Website,
}

impl DataProperty {
    pub fn local_name(&self) -> &'static str {
        match self {
            DataProperty::Gender => "gender",
            DataProperty::Nationality => "nationality",
            DataProperty::Activity => "activity",
            DataProperty::SourceType => "sourceType",
            DataProperty::Address => "address",
            DataProperty::Latitude => "latitude",
            DataProperty::Longitude => "longitude",
            DataProperty::Isbn => "isbn",
            DataProperty::Technique => "technique",
            DataProperty::Dimensions => "dimensions",
            DataProperty::Position => "position",
            DataProperty::InXsdDate => "inXSDDate",
            DataProperty::InXsdGYear => "inXSDgYear",
            DataProperty::Uri => "uri",
            DataProperty::Website => "website",
        }
    }

    pub fn datatype(&self) -> Datatype {
        match self {
            DataProperty::InXsdDate => Datatype::Date,
            DataProperty::InXsdGYear => Datatype::GYear,
            DataProperty::Uri | DataProperty::Website => Datatype::AnyUri,
            DataProperty::Latitude | DataProperty::Longitude => Datatype::Decimal,
            _ => Datatype::String,
        }
    }
}

// ============================================================================
// OBJECT PROPERTIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectProperty {
    HasRole,
    IsRoleOf,
    ParticipatesIn,
    HasParticipant,
    IsRoleWithin,
    HasRoleWithin,
    HasEvent,
    IsEventOf,
    IsActivityOf,
    HasActivity,
    HasTime,
    IsTimeOf,
    TookPlaceAt,
    IsPlaceOf,
    IsPartOfTerritory,
    HasTerritorialPart,
    HasTerritorialComponent,
    IsTerritorialComponentOf,
    IsSubInstitutionOf,
    HasSubInstitution,
    IsHeldAt,
    Hosts,
    HasCatalog,
    IsCatalogOf,
    Displays,
    IsDisplayedAt,
}

impl ObjectProperty {
    pub const ALL: [ObjectProperty; 26] = [
        ObjectProperty::HasRole,
        ObjectProperty::IsRoleOf,
        ObjectProperty::ParticipatesIn,
        ObjectProperty::HasParticipant,
        ObjectProperty::IsRoleWithin,
        ObjectProperty::HasRoleWithin,
        ObjectProperty::HasEvent,
        ObjectProperty::IsEventOf,
        ObjectProperty::IsActivityOf,
        ObjectProperty::HasActivity,
        ObjectProperty::HasTime,
        ObjectProperty::IsTimeOf,
        ObjectProperty::TookPlaceAt,
        ObjectProperty::IsPlaceOf,
        ObjectProperty::IsPartOfTerritory,
        ObjectProperty::HasTerritorialPart,
        ObjectProperty::HasTerritorialComponent,
        ObjectProperty::IsTerritorialComponentOf,
        ObjectProperty::IsSubInstitutionOf,
        ObjectProperty::HasSubInstitution,
        ObjectProperty::IsHeldAt,
        ObjectProperty::Hosts,
        ObjectProperty::HasCatalog,
        ObjectProperty::IsCatalogOf,
        ObjectProperty::Displays,
        ObjectProperty::IsDisplayedAt,
    ];

    pub fn local_name(&self) -> &'static str {
        use ObjectProperty::*;
        match self {
            HasRole => "hasRole",
            IsRoleOf => "isRoleOf",
            ParticipatesIn => "participatesIn",
            HasParticipant => "hasParticipant",
            IsRoleWithin => "isRoleWithin",
            HasRoleWithin => "hasRoleWithin",
            HasEvent => "hasEvent",
            IsEventOf => "isEventOf",
            IsActivityOf => "isActivityOf",
            HasActivity => "hasActivity",
            HasTime => "hasTime",
            IsTimeOf => "isTimeOf",
            TookPlaceAt => "tookPlaceAt",
            IsPlaceOf => "isPlaceOf",
            IsPartOfTerritory => "isPartOfTerritory",
            HasTerritorialPart => "hasTerritorialPart",
            HasTerritorialComponent => "hasTerritorialComponent",
            IsTerritorialComponentOf => "isTerritorialComponentOf",
            IsSubInstitutionOf => "isSubInstitutionOf",
            HasSubInstitution => "hasSubInstitution",
            IsHeldAt => "isHeldAt",
            Hosts => "hosts",
            HasCatalog => "hasCatalog",
            IsCatalogOf => "isCatalogOf",
            Displays => "displays",
            IsDisplayedAt => "isDisplayedAt",
        }
    }

    /// Declared inverse; the relation is symmetric over the pair
    pub fn inverse(&self) -> ObjectProperty {
        use ObjectProperty::*;
        match self {
            HasRole => IsRoleOf,
            IsRoleOf => HasRole,
            ParticipatesIn => HasParticipant,
            HasParticipant => ParticipatesIn,
            IsRoleWithin => HasRoleWithin,
            HasRoleWithin => IsRoleWithin,
            HasEvent => IsEventOf,
            IsEventOf => HasEvent,
            IsActivityOf => HasActivity,
            HasActivity => IsActivityOf,
            HasTime => IsTimeOf,
            IsTimeOf => HasTime,
            TookPlaceAt => IsPlaceOf,
            IsPlaceOf => TookPlaceAt,
            IsPartOfTerritory => HasTerritorialPart,
            HasTerritorialPart => IsPartOfTerritory,
            HasTerritorialComponent => IsTerritorialComponentOf,
            IsTerritorialComponentOf => HasTerritorialComponent,
            IsSubInstitutionOf => HasSubInstitution,
            HasSubInstitution => IsSubInstitutionOf,
            IsHeldAt => Hosts,
            Hosts => IsHeldAt,
            HasCatalog => IsCatalogOf,
            IsCatalogOf => HasCatalog,
            Displays => IsDisplayedAt,
            IsDisplayedAt => Displays,
        }
    }
}
