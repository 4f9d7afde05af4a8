use thiserror::Error;

#[derive(Error, Debug)]
pub enum MiamzError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Clé API Google Vision manquante. Configurez-la avec `miamz config --set-api-key VOTRE_CLE` ou GOOGLE_VISION_API_KEY")]
    MissingApiKey,

    #[error("Fichier introuvable : {0}")]
    FileNotFound(String),

    #[error("Aucune image trouvée : {0}")]
    NoImagesFound(String),

    #[error("Erreur de lecture d'image : {0}")]
    ImageLoad(String),

    #[error("Erreur API Vision ({status}) : {message}")]
    Upstream { status: u16, message: String },

    #[error("Réponse Vision invalide : {0}")]
    MalformedResponse(String),

    #[error("Erreur réseau : {0}")]
    Http(String),

    #[error("Erreur de saisie : {0}")]
    Prompt(String),

    #[error("Erreur JSON : {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erreur IO : {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] miamz_common::Error),
}

impl MiamzError {
    /// 「解析失敗」系のエラーか（認証・通信・応答の失敗。撮り直しを促す）
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            MiamzError::MissingApiKey
                | MiamzError::Upstream { .. }
                | MiamzError::MalformedResponse(_)
                | MiamzError::Http(_)
                | MiamzError::Common(miamz_common::Error::ServiceReported { .. })
        )
    }
}

impl From<reqwest::Error> for MiamzError {
    fn from(e: reqwest::Error) -> Self {
        MiamzError::Http(e.to_string())
    }
}

impl From<image::ImageError> for MiamzError {
    fn from(e: image::ImageError) -> Self {
        MiamzError::ImageLoad(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MiamzError>;
