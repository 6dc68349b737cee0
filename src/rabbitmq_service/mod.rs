pub mod rabbitmq_service;
