pub mod logout;
pub mod refresh;
pub mod signin;
pub mod signup;
pub mod token_utils;
