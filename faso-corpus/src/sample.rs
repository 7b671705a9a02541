//! Built-in sample documents about tourism in Burkina Faso.
//!
//! Used to seed a fresh corpus so the assistant answers usefully before
//! any real ingestion has run.

/// One sample document: text, title, and category.
#[derive(Debug, Clone, Copy)]
pub struct SampleDocument {
    /// Document text (French).
    pub text: &'static str,
    /// Document title.
    pub title: &'static str,
    /// Topical category.
    pub category: &'static str,
}

/// The demonstration data set shipped with the assistant.
pub static SAMPLE_DOCUMENTS: &[SampleDocument] = &[
    SampleDocument {
        text: "Ouagadougou est la capitale du Burkina Faso. La ville est le centre politique, \
               économique et culturel du pays. Elle abrite le Palais de Koulouba, résidence \
               officielle du président, et de nombreux musées importants comme le Musée National \
               du Burkina Faso qui présente l'histoire et la culture du pays.",
        title: "Ouagadougou - Capitale du Burkina Faso",
        category: "tourisme",
    },
    SampleDocument {
        text: "Bobo-Dioulasso est la deuxième plus grande ville du Burkina Faso. Connue comme la \
               ville des arts et de la culture, elle est un important centre touristique avec ses \
               mosquées anciennes, ses marchés colorés et son architecture traditionnelle. La \
               ville est aussi un carrefour commercial important.",
        title: "Bobo-Dioulasso - Ville des Arts",
        category: "tourisme",
    },
    SampleDocument {
        text: "La Cascade de Karfiguéla est l'une des plus belles cascades du Burkina Faso, \
               située dans la région de Cascades. Elle offre un paysage spectaculaire avec ses \
               chutes d'eau de 60 mètres de hauteur. C'est une destination populaire pour les \
               randonneurs et les amateurs de nature.",
        title: "Cascade de Karfiguéla",
        category: "tourisme",
    },
    SampleDocument {
        text: "Le Parc W est une réserve naturelle transfrontalière partagée par le Burkina \
               Faso, le Niger et le Bénin. C'est l'un des plus grands parcs nationaux d'Afrique \
               de l'Ouest, riche en faune sauvage incluant des éléphants, des lions et des \
               antilopes. C'est un paradis pour les safaris.",
        title: "Parc W - Réserve Naturelle",
        category: "tourisme",
    },
    SampleDocument {
        text: "La Fête de la Musique de Dédougou est un événement culturel annuel qui célèbre la \
               musique traditionnelle et contemporaine du Burkina Faso. Elle attire des musiciens \
               et des visiteurs du monde entier pour découvrir la richesse musicale du pays.",
        title: "Fête de la Musique de Dédougou",
        category: "culture",
    },
    SampleDocument {
        text: "Les tissus traditionnels du Burkina Faso, en particulier le bogolan (tissu teint \
               avec de la boue), sont mondialement reconnus. Ces tissus sont produits par des \
               artisans locaux utilisant des techniques ancestrales et sont des symboles \
               importants de la culture burkinabè.",
        title: "Artisanat Textile Burkinabè",
        category: "culture",
    },
    SampleDocument {
        text: "Le Musée National du Burkina Faso à Ouagadougou présente une collection complète \
               d'artefacts historiques et culturels. Les visiteurs peuvent explorer l'histoire du \
               pays à travers des expositions permanentes et temporaires couvrant l'archéologie, \
               l'ethnographie et l'art.",
        title: "Musée National du Burkina Faso",
        category: "tourisme",
    },
    SampleDocument {
        text: "Banfora est une ville pittoresque dans la région des Cascades, connue pour ses \
               lacs colorés et ses formations rocheuses spectaculaires. Les Lacs Colorés de \
               Banfora sont une attraction touristique majeure avec leurs eaux teintées de \
               différentes couleurs dues aux minéraux.",
        title: "Banfora et ses Lacs Colorés",
        category: "tourisme",
    },
    SampleDocument {
        text: "La cuisine burkinabè est riche et variée, basée sur des ingrédients locaux comme \
               le mil, le sorgho, les arachides et les légumes. Les plats populaires incluent le \
               riz gras, le tô, et les brochettes. La gastronomie locale reflète la diversité \
               culturelle du pays.",
        title: "Gastronomie Burkinabè",
        category: "tourisme",
    },
    SampleDocument {
        text: "Le Festival Panafricain du Cinéma et de la Télévision (FESPACO) est l'un des plus \
               grands festivals de cinéma d'Afrique, organisé tous les deux ans à Ouagadougou. Il \
               célèbre le cinéma africain et attire des cinéastes et des visiteurs du monde \
               entier.",
        title: "FESPACO - Festival de Cinéma",
        category: "culture",
    },
];
