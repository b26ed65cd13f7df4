use serde::{Deserialize, Serialize};

use super::repo_types::{Material, MaterialPatch};
use crate::error::{non_blank, AppError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    #[serde(flatten)]
    pub material: Material,
    /// Short-lived download link; absent when object storage is not configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
}

impl TryFrom<UpdateMaterialRequest> for MaterialPatch {
    type Error = AppError;

    fn try_from(req: UpdateMaterialRequest) -> Result<Self, AppError> {
        Ok(Self {
            title: non_blank(req.title, "title")?,
        })
    }
}
