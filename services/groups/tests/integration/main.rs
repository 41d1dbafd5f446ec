mod admin_user_test;
mod leadership_test;
