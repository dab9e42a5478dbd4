use crate::entities::{Client, ClientId};

use super::iso_datetime_model::IsoDateTimeModel;

/// Client row as persisted. Reads both the camelCase shape of the local
/// document and the snake_case shape of the hosted database; always writes
/// camelCase.
#[derive(Debug, Clone, serde_derive::Deserialize, serde_derive::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClientModel {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(alias = "preferred_payment_method", default)]
    pub preferred_payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(alias = "created_at")]
    pub created_at: IsoDateTimeModel,
}

impl From<ClientModel> for Client {
    fn from(model: ClientModel) -> Self {
        Client {
            id: ClientId(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            preferred_payment_method: model.preferred_payment_method,
            notes: model.notes.filter(|n| !n.is_empty()),
            created_at: model.created_at.into(),
        }
    }
}

impl From<&Client> for ClientModel {
    fn from(client: &Client) -> Self {
        ClientModel {
            id: client.id.0.clone(),
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            preferred_payment_method: client.preferred_payment_method.clone(),
            notes: client.notes.clone(),
            created_at: IsoDateTimeModel(client.created_at),
        }
    }
}
