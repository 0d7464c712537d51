mod logging_auth_middleware_test;
