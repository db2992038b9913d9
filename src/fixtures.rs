#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    use crate::schema::{Field, Schema};

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Foo {
        pub url: String,
        pub headers: HashMap<String, String>,
    }

    impl Schema for Foo {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::string("url", |f| &mut f.url),
                Field::mapping("headers", |f| &mut f.headers),
            ]
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Auth {
        pub username: String,
        pub password: String,
    }

    impl Schema for Auth {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::string("username", |a| &mut a.username),
                Field::string("password", |a| &mut a.password),
            ]
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Config {
        pub foo: Foo,
        pub service1: Auth,
        pub service2: Auth,
        pub log_file: String,
        pub refresh: bool,
        pub items: Vec<String>,
        pub port: i32,
        pub timeout: i64,
        pub ratio: f64,
    }

    impl Schema for Config {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::nested("foo", |c| &mut c.foo),
                Field::nested("service1", |c| &mut c.service1),
                Field::nested("service2", |c| &mut c.service2),
                Field::string("logfile,/var/app/log/logfile.log", |c| &mut c.log_file),
                Field::boolean("refresh", |c| &mut c.refresh),
                Field::sequence("items", |c| &mut c.items),
                Field::int32("port", |c| &mut c.port),
                Field::int64("timeout", |c| &mut c.timeout),
                Field::float64("ratio", |c| &mut c.ratio),
            ]
        }
    }

    #[test]
    fn fixture_defaults_are_zero_values() {
        let config = Config::default();
        assert_eq!(config.service1, Auth::default());
        assert!(!config.refresh);
        assert!(config.items.is_empty());
        assert_eq!(config.port, 0);
    }
}
