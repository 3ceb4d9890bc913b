//! Authentication use cases
//!
//! Each use case accepts a plain command, delegates to the `AuthService`, and
//! flattens the result into a response carrying only primitive fields.

mod change_password;
mod login_user;
mod logout_user;
mod refresh_token;
mod register_user;
mod update_profile;
mod verify_token;

pub use change_password::{ChangePasswordCommand, ChangePasswordUseCase};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use refresh_token::{RefreshTokenCommand, RefreshTokenResponse, RefreshTokenUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use update_profile::{UpdateProfileCommand, UpdateProfileResponse, UpdateProfileUseCase};
pub use verify_token::{VerifyTokenResponse, VerifyTokenUseCase};
