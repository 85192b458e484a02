//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API, camelCase con `_id`) dalla
//! rappresentazione interna (entities).

pub mod chat;
pub mod notification;
pub mod order;
pub mod query;
pub mod response;
pub mod user;

// Re-exports per facilitare l'import
pub use chat::{
    AdminChatMessageDTO, AdminMarkReadResponse, AdminReplyDTO, AdminReplyResponse,
    ChatMessageDTO, CreateChatMessageDTO, MarkReadResponse, SendMessageDTO, SendMessageResponse,
};
pub use notification::{
    CreateNotificationDTO, NotificationDTO, NotificationListResponse, NotificationResponse,
    UpdateNotificationDTO,
};
pub use order::{
    AssignRiderDTO, CreateOrderDTO, OrderDTO, OrderItemDTO, ReplaceOrderDTO, UpdateStatusDTO,
    VerifyDeliveryDTO,
};
pub use query::OrdersQuery;
pub use response::MessageResponse;
pub use user::{CreateRiderDTO, CreateUserDTO, RiderDTO, SignInDTO, SignInResponse, SignUpDTO, UserDTO};
