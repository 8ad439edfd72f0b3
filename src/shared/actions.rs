//! Action discriminator constants.
//!
//! Endpoints accept an `action` query parameter that selects a sub-behavior
//! within a single route. These constants are the full vocabulary; anything
//! else is rejected with a missing-parameter error.

// Account endpoint
pub const GET_ALL_USER_DETAILS: &str = "getAllUserDetails";
pub const GET_ALL_USER_TRANSACTIONS: &str = "getAllUserTransactions";
pub const REPORT_PROBLEM_AND_EMAIL_SEND: &str = "reportProblem";
pub const SEND_INQUIRY_AND_EMAIL_SEND: &str = "sendInquiry";

// Admin endpoint
pub const GET_ALL_USERS_AS_ADMIN: &str = "getAllUsersAsAdmin";
pub const GET_ALL_INQUIRIES_FOR_USER: &str = "getAllInquiriesForUser";
pub const GET_ALL_REPORTS_FOR_USER: &str = "getAllReportsForUser";

// Community endpoint
pub const GET_ALL_QUESTIONS: &str = "getAllQuestions";
pub const GET_ALL_TOPIC_NAMES: &str = "getAllTopicNames";
pub const ADD_QUESTION: &str = "addQuestion";
pub const DELETE_QUESTION: &str = "deleteQuestion";
pub const ADD_NEW_ANSWER: &str = "addNewAnswer";
pub const DELETE_ANSWER: &str = "deleteAnswer";
pub const INCREASE_VOTE_COUNT: &str = "increaseVoteCount";
pub const DECREASE_VOTE_COUNT: &str = "decreaseVoteCount";
pub const SOLVE_QUESTION: &str = "solveQuestion";
pub const SET_AGREE_TO_TERMS_AND_CONDITIONS: &str = "setAgreeToTermsAndConditions";
pub const GET_USER_AGREED_TO_TERMS_AND_CONDITIONS: &str = "getUserAgreedToTermsAndConditions";
