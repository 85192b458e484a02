//! HTTP wrapper sul backend del negozio.
//!
//! Le credenziali non vengono mai memorizzate nel client: ogni chiamata autenticata
//! riceve un `&Credentials` esplicito. Le letture di liste usate solo per la
//! visualizzazione degradano a un vettore vuoto in caso di errore; le scritture
//! restituiscono sempre `ClientError`.

use crate::error::ClientError;
use crate::models::{
    ChatExchange, ChatMessage, Credentials, NewOrder, Notification, NotificationList, Order,
    OrderStatus, Rider, User,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct SignInBody {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct ReplyBody {
    reply: ChatMessage,
}

#[derive(Deserialize)]
struct CountBody {
    count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModifiedCountBody {
    modified_count: u64,
}

#[derive(Deserialize)]
struct DataBody<T> {
    data: T,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Invia la richiesta e decodifica il body, trasformando le risposte non 2xx in errori
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
        debug!("Request failed with {}: {}", status, message);

        if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(message))
        } else {
            Err(ClientError::Api { status, message })
        }
    }

    // ************************* UTENTI ************************* //

    /// Login: restituisce le credenziali da passare alle chiamate successive
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(Credentials, User), ClientError> {
        let body: SignInBody = self
            .send(
                self.client
                    .post(self.url("/api/user/signin"))
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;
        Ok((Credentials::bearer(body.token), body.user))
    }

    pub async fn list_riders(&self, creds: &Credentials) -> Result<Vec<Rider>, ClientError> {
        self.send(
            self.client
                .get(self.url("/api/user/admin/riders"))
                .bearer_auth(creds.token()),
        )
        .await
    }

    // ************************* ORDINI ************************* //

    pub async fn list_orders(&self, creds: &Credentials) -> Result<Vec<Order>, ClientError> {
        self.send(self.client.get(self.url("/api/orders")).bearer_auth(creds.token()))
            .await
    }

    pub async fn get_order(&self, creds: &Credentials, order_id: &str) -> Result<Order, ClientError> {
        self.send(
            self.client
                .get(self.url(&format!("/api/orders/{}", order_id)))
                .bearer_auth(creds.token()),
        )
        .await
    }

    pub async fn create_order(&self, creds: &Credentials, order: &NewOrder) -> Result<Order, ClientError> {
        self.send(
            self.client
                .post(self.url("/api/orders"))
                .bearer_auth(creds.token())
                .json(order),
        )
        .await
    }

    /// Sostituzione completa del documento; la `version` letta viaggia nel payload
    #[instrument(skip(self, creds, order), fields(order_id = %order.id, version = order.version))]
    pub async fn replace_order(&self, creds: &Credentials, order: &Order) -> Result<Order, ClientError> {
        self.send(
            self.client
                .put(self.url(&format!("/api/orders/{}", order.id)))
                .bearer_auth(creds.token())
                .json(order),
        )
        .await
    }

    pub async fn update_order_status(
        &self,
        creds: &Credentials,
        order_id: &str,
        status: OrderStatus,
        version: Option<i64>,
    ) -> Result<Order, ClientError> {
        self.send(
            self.client
                .patch(self.url(&format!("/api/orders/{}/status", order_id)))
                .bearer_auth(creds.token())
                .json(&json!({ "status": status, "version": version })),
        )
        .await
    }

    pub async fn assign_rider(
        &self,
        creds: &Credentials,
        order_id: &str,
        rider_id: &str,
    ) -> Result<Order, ClientError> {
        self.send(
            self.client
                .put(self.url(&format!("/api/orders/assign-rider/{}", order_id)))
                .bearer_auth(creds.token())
                .json(&json!({ "riderId": rider_id })),
        )
        .await
    }

    pub async fn verify_delivery(
        &self,
        creds: &Credentials,
        order_id: &str,
        rider_token: &str,
    ) -> Result<Order, ClientError> {
        self.send(
            self.client
                .put(self.url(&format!("/api/orders/verify-delivery/{}", order_id)))
                .bearer_auth(creds.token())
                .json(&json!({ "riderToken": rider_token })),
        )
        .await
    }

    // ************************* CHAT ************************* //

    pub async fn send_chat_message(&self, user_id: &str, message: &str) -> Result<ChatExchange, ClientError> {
        self.send(
            self.client
                .post(self.url("/api/chat/message"))
                .json(&json!({ "userId": user_id, "message": message })),
        )
        .await
    }

    /// Storico della conversazione; vuoto se il backend non risponde
    pub async fn chat_history(&self, user_id: &str) -> Vec<ChatMessage> {
        match self
            .send(self.client.get(self.url(&format!("/api/chat/{}", user_id))))
            .await
        {
            Ok(messages) => messages,
            Err(err) => {
                warn!("Failed to load chat history: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn mark_chat_read(&self, user_id: &str) -> Result<u64, ClientError> {
        let body: CountBody = self
            .send(self.client.put(self.url(&format!("/api/chat/mark-read/{}", user_id))))
            .await?;
        Ok(body.count)
    }

    /// Tutte le conversazioni per il pannello admin; vuoto in caso di errore
    pub async fn admin_chat_messages(&self, creds: &Credentials) -> Vec<ChatMessage> {
        match self
            .send(
                self.client
                    .get(self.url("/api/chat/admin/messages"))
                    .bearer_auth(creds.token()),
            )
            .await
        {
            Ok(messages) => messages,
            Err(err) => {
                warn!("Failed to load admin chat messages: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn admin_reply(
        &self,
        creds: &Credentials,
        user_id: &str,
        message: &str,
    ) -> Result<ChatMessage, ClientError> {
        let body: ReplyBody = self
            .send(
                self.client
                    .post(self.url("/api/chat/admin/reply"))
                    .bearer_auth(creds.token())
                    .json(&json!({ "userId": user_id, "message": message })),
            )
            .await?;
        Ok(body.reply)
    }

    pub async fn admin_mark_chat_read(&self, creds: &Credentials, user_id: &str) -> Result<u64, ClientError> {
        let body: ModifiedCountBody = self
            .send(
                self.client
                    .put(self.url(&format!("/api/chat/admin/mark-read/{}", user_id)))
                    .bearer_auth(creds.token()),
            )
            .await?;
        Ok(body.modified_count)
    }

    // ************************* NOTIFICHE ************************* //

    /// Ultime notifiche con il contatore delle non lette; lista vuota in caso di errore
    pub async fn notifications(&self, creds: &Credentials) -> NotificationList {
        match self
            .send(
                self.client
                    .get(self.url("/api/notifications"))
                    .bearer_auth(creds.token()),
            )
            .await
        {
            Ok(list) => list,
            Err(err) => {
                warn!("Failed to load notifications: {}", err);
                NotificationList::default()
            }
        }
    }

    pub async fn mark_notification_read(
        &self,
        creds: &Credentials,
        notification_id: &str,
    ) -> Result<Notification, ClientError> {
        let body: DataBody<Notification> = self
            .send(
                self.client
                    .put(self.url(&format!("/api/notifications/{}/read", notification_id)))
                    .bearer_auth(creds.token()),
            )
            .await?;
        Ok(body.data)
    }

    pub async fn mark_all_notifications_read(&self, creds: &Credentials) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.url("/api/notifications/read-all"))
            .bearer_auth(creds.token())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
