//! Serde records mirroring the REST schemas.
//!
//! Read models tolerate missing optional fields and ignore unknown ones, so
//! server additions do not break the client. Write payloads are separate
//! `*Mutate` / `*Create` types where the write shape differs from the read
//! shape.

mod badge;
mod event;
mod form;
mod gallery;
mod group;
mod job_post;
mod misc;
mod news;
mod notification;
mod user;

pub use badge::{Badge, BadgeCategory, BadgeClaim, BadgeLeaderboard};
pub use event::{
    reaction_counts, Category, Event, EventFavorite, EventList, EventMutate, EventPermissions,
    EventStatistics, PublicRegistration, Reaction, ReactionMutate, Registration,
    RegistrationMutate, RegistrationWindow, StudyCount, StudyYearCount,
};
pub use form::{
    Answer, AnswerDraft, EventFormType, FieldRef, FieldStatistics, Form, FormCreate, FormField,
    FormFieldOption, FormFieldType, FormResourceType, FormStatistics, FormUpdate,
    OptionStatistics, Submission, UserSubmission,
};
pub use gallery::{Gallery, GalleryMutate, Picture, PictureMutate};
pub use group::{
    sort_laws, Group, GroupBase, GroupFine, GroupFineBatchMutate, GroupFineCreate,
    GroupFineDefenseMutate, GroupFineMutate, GroupFineStatistics, GroupLaw, GroupLawMutate,
    GroupList, GroupMemberStatistics, GroupMutate, GroupPermissions, GroupType, GroupUserFine,
    Membership, MembershipHistory, MembershipHistoryMutate, MembershipType,
};
pub use job_post::{JobPost, JobPostMutate, JobPostType};
pub use misc::{
    unread_warnings, Cheatsheet, CheatsheetStudy, Feedback, FeedbackCreate, FeedbackStatus,
    FeedbackType, FileUploadResponse, QrCode, QrCodeCreate, ShortLink, Strike, StrikeCreate,
    StrikeKind, StrikeList, StrikeReason, Toddel, ToddelMutate, Warning, WarningType,
};
pub use news::{News, NewsMutate};
pub use notification::{Notification, NotificationMutate};
pub use user::{
    LoginRequest, LoginResponse, NotificationSetting, NotificationSettingChoice, Permission,
    User, UserBase, UserCreate, UserList, UserPermissions, UserUpdate,
};
