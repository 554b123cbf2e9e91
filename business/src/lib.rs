pub mod application {
    pub mod recipe {
        pub mod generate;
    }
}

pub mod domain {
    pub mod logger;
    pub mod recipe {
        pub mod errors;
        pub mod model;
        pub mod sanitize;
        pub mod services;
        pub mod use_cases {
            pub mod generate;
        }
    }
}
