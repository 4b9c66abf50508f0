use thiserror::Error;

use crate::domain::{
    CommentEligibilityError, DecideBookingError, InvalidPage, InvalidPeriod, RequestBookingError,
    UnknownBookingState,
};

/// エラーの種別
///
/// NotFoundは権限不足による秘匿も含む。Internalはサーバー側の不具合を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Internal,
}

/// 予約・アイテムアプリケーション層のエラー
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// ユーザー・アイテム・予約が存在しない
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 権限のない操作
    ///
    /// 存在を確認させないため、表示はNotFoundと区別できない。
    /// `ApplicationError::hidden`でのみ生成する。
    #[error("{resource} not found")]
    Hidden {
        resource: &'static str,
        reason: &'static str,
    },

    /// 入力やビジネスルールの検証エラー
    #[error("{0}")]
    Validation(String),

    /// 未知の予約状態などサーバー側の不具合
    #[error("{0}")]
    Internal(String),

    /// BookingRepositoryのエラー
    #[error("Booking repository error")]
    BookingRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// CommentRepositoryのエラー
    #[error("Comment repository error")]
    CommentRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserDirectoryのエラー
    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemCatalogのエラー
    #[error("Item catalog error")]
    ItemCatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApplicationError {
    /// 権限不足をNotFoundとして返す
    ///
    /// 所有者・借り手以外によるアクセスはすべてここを通る。
    pub fn hidden(resource: &'static str, reason: &'static str) -> Self {
        tracing::warn!(resource, reason, "access denied, reporting as not found");
        ApplicationError::Hidden { resource, reason }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::NotFound(_) | ApplicationError::Hidden { .. } => ErrorKind::NotFound,
            ApplicationError::Validation(_) => ErrorKind::Validation,
            ApplicationError::Internal(_)
            | ApplicationError::BookingRepositoryError(_)
            | ApplicationError::CommentRepositoryError(_)
            | ApplicationError::UserDirectoryError(_)
            | ApplicationError::ItemCatalogError(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<InvalidPeriod> for ApplicationError {
    fn from(err: InvalidPeriod) -> Self {
        ApplicationError::Validation(format!(
            "Invalid booking period: start {} must be before end {}",
            err.start, err.end
        ))
    }
}

impl From<InvalidPage> for ApplicationError {
    fn from(err: InvalidPage) -> Self {
        match err {
            InvalidPage::NegativeFrom(from) => {
                ApplicationError::Validation(format!("from must not be negative: {}", from))
            }
            InvalidPage::NonPositiveSize(size) => {
                ApplicationError::Validation(format!("size must be at least 1: {}", size))
            }
        }
    }
}

impl From<RequestBookingError> for ApplicationError {
    fn from(err: RequestBookingError) -> Self {
        match err {
            RequestBookingError::ItemNotAvailable => {
                ApplicationError::Validation("Item is not available for rent".to_string())
            }
            RequestBookingError::OwnerCannotBookOwnItem => {
                ApplicationError::hidden("Item", "owner cannot book own item")
            }
            RequestBookingError::OverlapsApprovedBooking => ApplicationError::Validation(
                "Booking period overlaps an approved booking".to_string(),
            ),
        }
    }
}

impl From<DecideBookingError> for ApplicationError {
    fn from(err: DecideBookingError) -> Self {
        match err {
            DecideBookingError::NotItemOwner => {
                ApplicationError::hidden("Booking", "only the item owner can approve")
            }
            DecideBookingError::AlreadyApproved => {
                ApplicationError::Validation("Cannot approve a booking twice".to_string())
            }
            DecideBookingError::AlreadyRejected => {
                ApplicationError::Validation("Cannot reject a booking twice".to_string())
            }
        }
    }
}

impl From<CommentEligibilityError> for ApplicationError {
    fn from(err: CommentEligibilityError) -> Self {
        let message = match err {
            CommentEligibilityError::NeverBooked => "Only renters may comment",
            CommentEligibilityError::HasRejectedBooking => {
                "Cannot comment, rental was not possible"
            }
            CommentEligibilityError::RentalNotStarted => {
                "Cannot comment before the rental starts"
            }
        };
        ApplicationError::Validation(message.to_string())
    }
}

impl From<UnknownBookingState> for ApplicationError {
    fn from(err: UnknownBookingState) -> Self {
        ApplicationError::Internal(err.to_string())
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ApplicationError>;
