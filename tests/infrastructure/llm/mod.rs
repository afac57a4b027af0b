mod llm_factory_test;
