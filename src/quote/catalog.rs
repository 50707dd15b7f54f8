//! Static project-type catalog.
//!
//! Maps every project type the form can submit to its display label, visual
//! theme and commercial content (features, technologies, timeline,
//! deliverables). The PDF renderer consumes the full configuration, the email
//! dispatcher only the display labels. Unrecognized types fall back to
//! [`ProjectType::Other`].

use serde::{Deserialize, Serialize};

/// Fixed set of project types offered by the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Website,
    Ecommerce,
    WebApp,
    MobileApp,
    Other,
}

impl ProjectType {
    /// Lenient parse from the raw form value; anything unknown becomes `Other`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "website" => Self::Website,
            "ecommerce" => Self::Ecommerce,
            "webapp" => Self::WebApp,
            "mobileapp" => Self::MobileApp,
            _ => Self::Other,
        }
    }
}

/// RGB color pair used by the document renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: (u8, u8, u8),
    pub accent: (u8, u8, u8),
}

/// Full per-type configuration consumed by the quote document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTypeConfig {
    pub label: &'static str,
    pub theme: Theme,
    pub symbol: &'static str,
    pub features: &'static [&'static str],
    pub technologies: &'static [&'static str],
    pub timeline: &'static str,
    pub deliverables: &'static [&'static str],
}

const WEBSITE: ProjectTypeConfig = ProjectTypeConfig {
    label: "Sito Web",
    theme: Theme {
        primary: (109, 40, 217),
        accent: (167, 139, 250),
    },
    symbol: "WEB",
    features: &[
        "Design responsive per tutti i dispositivi",
        "Ottimizzazione SEO di base",
        "Integrazione Google Analytics",
        "Modulo di contatto funzionante",
        "Hosting e dominio per 1 anno",
        "SSL Certificate incluso",
    ],
    technologies: &["HTML5", "CSS3", "JavaScript", "React", "Next.js"],
    timeline: "2-4 settimane",
    deliverables: &[
        "Sito web completo e funzionante",
        "Pannello di amministrazione",
        "Documentazione tecnica",
        "Training per la gestione contenuti",
    ],
};

const ECOMMERCE: ProjectTypeConfig = ProjectTypeConfig {
    label: "E-commerce",
    theme: Theme {
        primary: (34, 197, 94),
        accent: (134, 239, 172),
    },
    symbol: "SHOP",
    features: &[
        "Catalogo prodotti completo",
        "Sistema di pagamento sicuro",
        "Gestione ordini e inventario",
        "Dashboard amministrativa",
        "Integrazione corrieri",
        "Sistema di recensioni",
    ],
    technologies: &["Shopify", "WooCommerce", "Stripe", "PayPal", "React"],
    timeline: "4-8 settimane",
    deliverables: &[
        "Negozio online completo",
        "Sistema di gestione ordini",
        "Integrazione pagamenti",
        "Training per la gestione prodotti",
    ],
};

const WEBAPP: ProjectTypeConfig = ProjectTypeConfig {
    label: "Web App",
    theme: Theme {
        primary: (59, 130, 246),
        accent: (147, 197, 253),
    },
    symbol: "APP",
    features: &[
        "Interfaccia utente intuitiva",
        "Database personalizzato",
        "Sistema di autenticazione",
        "API REST integrate",
        "Dashboard analytics",
        "Backup automatici",
    ],
    technologies: &["React", "Node.js", "PostgreSQL", "MongoDB", "AWS"],
    timeline: "6-12 settimane",
    deliverables: &[
        "Applicazione web completa",
        "Database configurato",
        "Documentazione API",
        "Sistema di monitoraggio",
    ],
};

const MOBILEAPP: ProjectTypeConfig = ProjectTypeConfig {
    label: "App Mobile",
    theme: Theme {
        primary: (168, 85, 247),
        accent: (196, 181, 253),
    },
    symbol: "MOBILE",
    features: &[
        "App nativa iOS e Android",
        "Design Material/Human Interface",
        "Notifiche push",
        "Sincronizzazione cloud",
        "Modalità offline",
        "Analytics integrate",
    ],
    technologies: &["React Native", "Flutter", "Firebase", "Redux", "TypeScript"],
    timeline: "8-16 settimane",
    deliverables: &[
        "App mobile per iOS e Android",
        "Backend API",
        "Pubblicazione su App Store",
        "Documentazione utente",
    ],
};

const OTHER: ProjectTypeConfig = ProjectTypeConfig {
    label: "Altro",
    theme: Theme {
        primary: (245, 158, 11),
        accent: (251, 191, 36),
    },
    symbol: "CUSTOM",
    features: &[
        "Soluzione personalizzata",
        "Analisi dei requisiti",
        "Architettura su misura",
        "Integrazione sistemi esistenti",
        "Supporto tecnico dedicato",
        "Scalabilita garantita",
    ],
    technologies: &["Tecnologie da definire", "Architettura personalizzata"],
    timeline: "Da definire",
    deliverables: &[
        "Soluzione personalizzata",
        "Documentazione completa",
        "Training specifico",
        "Supporto post-lancio",
    ],
};

impl ProjectType {
    pub fn config(self) -> &'static ProjectTypeConfig {
        match self {
            Self::Website => &WEBSITE,
            Self::Ecommerce => &ECOMMERCE,
            Self::WebApp => &WEBAPP,
            Self::MobileApp => &MOBILEAPP,
            Self::Other => &OTHER,
        }
    }
}

/// Configuration for a raw form value, falling back to the `Other` block.
pub fn config_for(raw_project_type: &str) -> &'static ProjectTypeConfig {
    ProjectType::from_raw(raw_project_type).config()
}

/// Display label for a raw project-type value; unmapped values pass through.
pub fn project_type_label(raw: &str) -> String {
    match raw.trim().to_ascii_lowercase().as_str() {
        "website" => WEBSITE.label.to_string(),
        "ecommerce" => ECOMMERCE.label.to_string(),
        "webapp" => WEBAPP.label.to_string(),
        "mobileapp" => MOBILEAPP.label.to_string(),
        // Legacy form values that only ever reach the notification email.
        "app" => "Applicazione".to_string(),
        "branding" => "Branding".to_string(),
        "other" => OTHER.label.to_string(),
        _ => raw.to_string(),
    }
}

/// Display label for a raw budget bracket; unmapped values pass through.
pub fn budget_label(raw: &str) -> String {
    match raw.trim() {
        "<1000" => "Meno di 1000€".to_string(),
        "1000-3000" => "1000€ - 3000€".to_string(),
        "3000-5000" => "3000€ - 5000€".to_string(),
        "5000-10000" => "5000€ - 10000€".to_string(),
        ">10000" => "Più di 10000€".to_string(),
        other => other.to_string(),
    }
}
