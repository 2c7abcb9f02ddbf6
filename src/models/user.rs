use serde::Serialize;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
}

/// The part of a user that is safe to hand back to clients.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PublicUser {
    pub user_id: i64,
    pub username: String,
    pub name: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            user_id: user.user_id,
            username: user.username,
            name: user.name,
        }
    }
}
